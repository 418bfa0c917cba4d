//! Feature listener groups and the startup composition root.
//!
//! Each feature exposes one `register_*_listeners` function that subscribes
//! its handlers on an [`EventRegistry`]. Today the handlers log; outbound
//! email and digests will hang off the same subscriptions.

pub mod blog;
pub mod cities;
pub mod events;
pub mod newsletter;
pub mod users;

use civic_events::EventRegistry;

pub const GROUP_USERS: &str = "users";
pub const GROUP_CITIES: &str = "cities";
pub const GROUP_EVENTS: &str = "events";
pub const GROUP_BLOG: &str = "blog";
pub const GROUP_NEWSLETTER: &str = "newsletter";

/// Listener groups in installation order.
const GROUPS: [(&str, fn(&mut EventRegistry)); 5] = [
    (GROUP_USERS, users::register_user_listeners),
    (GROUP_CITIES, cities::register_city_listeners),
    (GROUP_EVENTS, events::register_event_listeners),
    (GROUP_BLOG, blog::register_blog_listeners),
    (GROUP_NEWSLETTER, newsletter::register_newsletter_listeners),
];

/// Install every feature's listeners, each group at most once.
///
/// Calling this again on the same registry installs nothing, so no handler
/// can end up subscribed twice. Returns the number of groups installed by
/// this call.
pub fn initialize_all_listeners(registry: &mut EventRegistry) -> usize {
    let mut installed = 0;
    for (group, register) in GROUPS {
        if registry.install(group, register) {
            installed += 1;
        }
    }

    if installed > 0 {
        tracing::info!(groups = installed, "Event listeners initialized");
    }
    installed
}
