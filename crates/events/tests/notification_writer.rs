//! The notification writer persists rows for published events and exits
//! when the bus is dropped.

use bookmyshoot_core::booking::{BookingParties, BookingStatus};
use bookmyshoot_db::models::user::CreateUser;
use bookmyshoot_db::repositories::{NotificationRepo, UserRepo};
use bookmyshoot_events::{EventBus, NotificationWriter, PlatformEvent};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            full_name: email.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn writer_persists_counterpart_notifications(pool: PgPool) {
    let customer = seed_user(&pool, "c@example.com", "customer").await;
    let photographer = seed_user(&pool, "p@example.com", "photographer").await;
    let parties = BookingParties {
        customer_id: customer,
        photographer_id: photographer,
    };

    let bus = EventBus::default();
    let writer = tokio::spawn(NotificationWriter::run(pool.clone(), bus.subscribe()));

    bus.publish(PlatformEvent::booking_created(42, parties));
    bus.publish(PlatformEvent::booking_status_changed(
        42,
        parties,
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        photographer,
    ));
    drop(bus);
    writer.await.unwrap();

    let for_photographer = NotificationRepo::list_for_user(&pool, photographer, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(for_photographer.len(), 1);
    assert_eq!(for_photographer[0].title, "New booking request");

    let for_customer = NotificationRepo::list_for_user(&pool, customer, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(for_customer.len(), 1);
    assert_eq!(for_customer[0].related_entity_id, Some(42));
    assert_eq!(NotificationRepo::unread_count(&pool, customer).await.unwrap(), 1);

    assert!(NotificationRepo::mark_read(&pool, for_customer[0].id, customer)
        .await
        .unwrap());
    assert!(!NotificationRepo::mark_read(&pool, for_customer[0].id, customer)
        .await
        .unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, customer).await.unwrap(), 0);
    assert_eq!(NotificationRepo::mark_all_read(&pool, photographer).await.unwrap(), 1);
}
