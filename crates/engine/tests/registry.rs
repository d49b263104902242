use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::Database;

use engine::{DateRange, Engine, EngineError, NewBookingCmd, Role};
use migration::MigratorTrait;

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn rooms_are_listed_by_id() {
    let engine = engine().await;
    engine.new_room(201, "Courtyard", "Standard", 3000).await.unwrap();
    engine.new_room(101, "Garden", "Deluxe", 4500).await.unwrap();

    let rids: Vec<i64> = engine
        .rooms()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.rid)
        .collect();
    assert_eq!(rids, vec![101, 201]);

    let room = engine.room(101).await.unwrap();
    assert_eq!(room.name, "Garden");
    assert_eq!(room.price, 4500);
    assert!(!room.is_booked);
}

#[tokio::test]
async fn duplicate_and_missing_rooms() {
    let engine = engine().await;
    engine.new_room(101, "Garden", "Deluxe", 4500).await.unwrap();

    let err = engine
        .new_room(101, "Other", "Deluxe", 1)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("room 101".to_string()));

    let err = engine.room(7).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("room 7".to_string()));

    let err = engine
        .refresh_room_flag(7, date("2024-01-01"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("room 7".to_string()));
}

#[tokio::test]
async fn refresh_room_flag_uses_given_day() {
    let engine = engine().await;
    engine.new_room(101, "Garden", "Deluxe", 4500).await.unwrap();
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    engine
        .create_booking(
            NewBookingCmd::new(
                101,
                "Ada",
                "555",
                DateRange::new(date("2024-01-10"), date("2024-01-12")).unwrap(),
            ),
            now,
        )
        .await
        .unwrap();
    assert!(!engine.room(101).await.unwrap().is_booked);

    assert!(engine.refresh_room_flag(101, date("2024-01-12")).await.unwrap());
    assert!(engine.room(101).await.unwrap().is_booked);
    assert!(!engine.refresh_room_flag(101, date("2024-01-13")).await.unwrap());
}

#[tokio::test]
async fn users_authenticate_by_email_and_password() {
    let engine = engine().await;
    let created = engine
        .new_user("Admin@Hotel.test", "s3cret", Role::Admin)
        .await
        .unwrap();
    assert_eq!(created.email, "admin@hotel.test");
    assert_eq!(created.role, Role::Admin);

    let user = engine
        .authenticate(" admin@hotel.test", "s3cret")
        .await
        .unwrap();
    assert_eq!(user, created);

    let err = engine
        .authenticate("admin@hotel.test", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user".to_string()));
    let err = engine
        .authenticate("nobody@hotel.test", "s3cret")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user".to_string()));

    let err = engine
        .new_user("admin@hotel.test", "x", Role::Manager)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("admin@hotel.test".to_string()));
}

#[tokio::test]
async fn dashboard_counts_from_ledger() {
    let engine = engine().await;
    for (rid, name) in [(101, "Garden"), (102, "Sea View"), (103, "Loft")] {
        engine.new_room(rid, name, "Deluxe", 4000).await.unwrap();
    }
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let stays = [
        (101, "2024-01-10", "2024-01-12"),
        (101, "2024-01-13", "2024-01-14"),
        (102, "2024-01-11", "2024-01-11"),
        (103, "2024-02-01", "2024-02-02"),
    ];
    let mut ids = Vec::new();
    for (rid, start, end) in stays {
        let booking = engine
            .create_booking(
                NewBookingCmd::new(
                    rid,
                    "Guest",
                    "555",
                    DateRange::new(date(start), date(end)).unwrap(),
                ),
                now,
            )
            .await
            .unwrap();
        ids.push(booking.id);
    }
    engine.soft_delete_booking(ids[2], now).await.unwrap();

    let dashboard = engine.dashboard(date("2024-01-11")).await.unwrap();
    assert_eq!(dashboard.total_rooms, 3);
    assert_eq!(dashboard.total_bookings, 3);
    assert_eq!(dashboard.booked_count, 1);
    assert_eq!(dashboard.available_count, 2);
    let recent: Vec<i64> = dashboard.recent_bookings.iter().map(|b| b.id).collect();
    assert_eq!(recent, vec![ids[3], ids[1], ids[0]]);
}
