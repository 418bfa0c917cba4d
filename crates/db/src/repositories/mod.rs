//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod city_event_repo;
pub mod city_repo;
pub mod membership_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod subscriber_repo;

pub use city_event_repo::CityEventRepo;
pub use city_repo::CityRepo;
pub use membership_repo::MembershipRepo;
pub use post_repo::PostRepo;
pub use profile_repo::ProfileRepo;
pub use subscriber_repo::SubscriberRepo;
