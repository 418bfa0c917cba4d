//! Row types and create/update DTOs, one module per table.

pub mod city;
pub mod city_event;
pub mod membership;
pub mod post;
pub mod profile;
pub mod subscriber;
