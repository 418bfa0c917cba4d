//! Integration tests for actions.
//!
//! Each test runs against a fresh in-memory store and observes published
//! events through the bus tap. Events must follow successful writes only.

mod common;

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use civic_api::actions::{cities, events, newsletter, posts, profiles};
use civic_api::error::AppError;
use civic_core::error::CoreError;
use civic_core::roles::CityRole;
use civic_core::types::new_id;
use civic_db::models::city::CreateCity;
use civic_db::models::city_event::CreateCityEvent;
use civic_db::models::post::{CreatePost, PostStatus};
use civic_db::models::profile::CreateProfile;
use civic_db::repositories::ProfileRepo;
use civic_events::{
    CityCreated, DispatchConfig, DomainEvent, EventCreated, EventRegistry, HandlerError,
    PostPublished, SubscriberAdded, SubscriberRemoved, UserCreated, UserJoinedCity,
};

use common::{drain, grant_role, platform_admin, seed_city, state_with_bus, test_state, user};

fn draft(title: &str) -> CreatePost {
    CreatePost {
        title: title.to_string(),
        body_md: "Bring gloves.".to_string(),
    }
}

fn meetup(title: &str) -> CreateCityEvent {
    let starts_at = Utc::now() + Duration::days(3);
    CreateCityEvent {
        title: title.to_string(),
        description: None,
        location: Some("Riverside park".to_string()),
        starts_at,
        ends_at: Some(starts_at + Duration::hours(2)),
    }
}

// ---------------------------------------------------------------------------
// Test: profile creation publishes user:created
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_profile_publishes_user_created() {
    let state = test_state();
    let mut tap = state.event_bus.tap();
    let actor = user("Ana@Example.org");

    let profile = profiles::create_profile(
        &state,
        &actor,
        &CreateProfile {
            display_name: Some("Ana".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(profile.email, "ana@example.org");
    assert_eq!(
        drain(&mut tap),
        vec![DomainEvent::UserCreated(UserCreated {
            user_id: actor.user_id,
            email: "ana@example.org".into(),
        })]
    );
}

#[tokio::test]
async fn duplicate_profile_publishes_nothing() {
    let state = test_state();
    let actor = user("ana@example.org");
    let input = CreateProfile { display_name: None };
    profiles::create_profile(&state, &actor, &input).await.unwrap();

    let mut tap = state.event_bus.tap();
    let err = profiles::create_profile(&state, &actor, &input)
        .await
        .unwrap_err();

    assert_eq!(err.code(), "CONFLICT");
    assert!(drain(&mut tap).is_empty());
}

// ---------------------------------------------------------------------------
// Test: a failing listener never fails the action
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_listeners_do_not_fail_the_action() {
    let calls = Arc::new(Mutex::new(0u32));
    let mut registry = EventRegistry::new();
    registry.subscribe("users.broken", |_: UserCreated| async {
        Err::<(), HandlerError>("mailer offline".into())
    });
    let counter = Arc::clone(&calls);
    registry.subscribe("users.counted", move |_: UserCreated| {
        let counter = Arc::clone(&counter);
        async move {
            *counter.lock().unwrap() += 1;
            Ok(())
        }
    });
    let state = state_with_bus(registry.seal(DispatchConfig::default()));
    let actor = user("ana@example.org");

    profiles::create_profile(&state, &actor, &CreateProfile { display_name: None })
        .await
        .unwrap();
    assert!(state.event_bus.shutdown().await);

    assert!(ProfileRepo::find_by_id(&state.pool, actor.user_id)
        .await
        .unwrap()
        .is_some());
    assert_eq!(*calls.lock().unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: city provisioning
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_city_publishes_created_then_joined() {
    let state = test_state();
    let mut tap = state.event_bus.tap();
    let admin = platform_admin();

    let city = seed_city(&state, &admin, "Rio de Janeiro").await;

    assert_eq!(city.slug, "rio-de-janeiro");
    assert_eq!(
        drain(&mut tap),
        vec![
            DomainEvent::CityCreated(CityCreated {
                city_id: city.id,
                slug: "rio-de-janeiro".into(),
            }),
            DomainEvent::UserJoinedCity(UserJoinedCity {
                user_id: admin.user_id,
                city_id: city.id,
            }),
        ]
    );
}

#[tokio::test]
async fn create_city_requires_platform_admin() {
    let state = test_state();
    let mut tap = state.event_bus.tap();

    let err = cities::create_city(
        &state,
        &user("ana@example.org"),
        &CreateCity {
            name: "Lisbon".into(),
            slug: None,
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    assert!(drain(&mut tap).is_empty());
}

#[tokio::test]
async fn duplicate_city_slug_publishes_nothing() {
    let state = test_state();
    let admin = platform_admin();
    seed_city(&state, &admin, "Lisbon").await;

    let mut tap = state.event_bus.tap();
    let err = cities::create_city(
        &state,
        &admin,
        &CreateCity {
            name: "Lisbon".into(),
            slug: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.code(), "CONFLICT");
    assert!(drain(&mut tap).is_empty());
}

#[tokio::test]
async fn joining_twice_publishes_once() {
    let state = test_state();
    let city = seed_city(&state, &platform_admin(), "Porto").await;
    let mut tap = state.event_bus.tap();
    let ana = user("ana@example.org");

    let first = cities::join_city(&state, &ana, city.id).await.unwrap();
    let second = cities::join_city(&state, &ana, city.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.role, CityRole::Member);
    assert_eq!(
        drain(&mut tap),
        vec![DomainEvent::UserJoinedCity(UserJoinedCity {
            user_id: ana.user_id,
            city_id: city.id,
        })]
    );
}

#[tokio::test]
async fn joining_unknown_city_is_not_found() {
    let state = test_state();
    let err = cities::join_city(&state, &user("ana@example.org"), new_id())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn only_city_admins_change_roles() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Braga").await;
    let ana = user("ana@example.org");
    let bea = user("bea@example.org");
    cities::join_city(&state, &ana, city.id).await.unwrap();
    cities::join_city(&state, &bea, city.id).await.unwrap();

    let err = cities::set_member_role(&state, &ana, city.id, bea.user_id, CityRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    let promoted = cities::set_member_role(&state, &admin, city.id, bea.user_id, CityRole::Organizer)
        .await
        .unwrap();
    assert_eq!(promoted.role, CityRole::Organizer);
}

// ---------------------------------------------------------------------------
// Test: community events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn organizer_creates_event_and_publishes() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Coimbra").await;
    let organizer = user("org@example.org");
    grant_role(&state, &admin, &city, &organizer, CityRole::Organizer).await;
    let mut tap = state.event_bus.tap();

    let event = events::create_event(&state, &organizer, city.id, &meetup("River cleanup"))
        .await
        .unwrap();

    assert_eq!(
        drain(&mut tap),
        vec![DomainEvent::EventCreated(EventCreated {
            event_id: event.id,
            city_id: city.id,
        })]
    );
}

#[tokio::test]
async fn members_and_outsiders_cannot_create_events() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Faro").await;
    let member = user("member@example.org");
    cities::join_city(&state, &member, city.id).await.unwrap();
    let mut tap = state.event_bus.tap();

    for actor in [member, user("stranger@example.org")] {
        let err = events::create_event(&state, &actor, city.id, &meetup("Picnic"))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    }
    assert!(drain(&mut tap).is_empty());
}

#[tokio::test]
async fn invalid_schedule_publishes_nothing() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Evora").await;
    let mut tap = state.event_bus.tap();

    let mut input = meetup("Backwards");
    input.ends_at = Some(input.starts_at - Duration::hours(1));
    let err = events::create_event(&state, &admin, city.id, &input)
        .await
        .unwrap_err();

    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(drain(&mut tap).is_empty());
}

// ---------------------------------------------------------------------------
// Test: blog posts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drafts_publish_once() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Aveiro").await;
    let mut tap = state.event_bus.tap();

    let post = posts::create_post(&state, &admin, city.id, &draft("Cleanup recap"))
        .await
        .unwrap();
    assert_eq!(post.status, PostStatus::Draft);
    assert!(drain(&mut tap).is_empty(), "drafts publish no event");

    let published = posts::publish_post(&state, &admin, post.id).await.unwrap();
    let again = posts::publish_post(&state, &admin, post.id).await.unwrap();

    assert_eq!(published.status, PostStatus::Published);
    assert_eq!(again.published_at, published.published_at);
    assert_eq!(
        drain(&mut tap),
        vec![DomainEvent::PostPublished(PostPublished {
            post_id: post.id,
            title: "Cleanup recap".into(),
            city_id: city.id,
        })]
    );
}

#[tokio::test]
async fn organizers_cannot_feature_posts() {
    let state = test_state();
    let admin = platform_admin();
    let city = seed_city(&state, &admin, "Viseu").await;
    let organizer = user("org@example.org");
    grant_role(&state, &admin, &city, &organizer, CityRole::Organizer).await;
    let post = posts::create_post(&state, &organizer, city.id, &draft("Market day"))
        .await
        .unwrap();

    let err = posts::toggle_featured(&state, &organizer, post.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    let featured = posts::toggle_featured(&state, &admin, post.id).await.unwrap();
    assert!(featured.is_featured);
}

// ---------------------------------------------------------------------------
// Test: newsletter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_and_unsubscribe_publish_once_each() {
    let state = test_state();
    let city = seed_city(&state, &platform_admin(), "Leiria").await;
    let mut tap = state.event_bus.tap();

    assert!(newsletter::subscribe(&state, city.id, "Reader@Example.org").await.unwrap());
    assert!(!newsletter::subscribe(&state, city.id, "reader@example.org").await.unwrap());
    assert!(newsletter::unsubscribe(&state, city.id, "reader@example.org").await.unwrap());
    assert!(!newsletter::unsubscribe(&state, city.id, "reader@example.org").await.unwrap());

    assert_eq!(
        drain(&mut tap),
        vec![
            DomainEvent::SubscriberAdded(SubscriberAdded {
                email: "reader@example.org".into(),
                city_id: city.id,
            }),
            DomainEvent::SubscriberRemoved(SubscriberRemoved {
                email: "reader@example.org".into(),
                city_id: city.id,
            }),
        ]
    );
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let state = test_state();
    let city = seed_city(&state, &platform_admin(), "Tomar").await;

    let err = newsletter::subscribe(&state, city.id, "not-an-email")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}
