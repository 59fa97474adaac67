//! Full booking lifecycle driven through the public API: room creation,
//! booking with snapshot pricing, conflict handling, analytics, cancellation,
//! and room deletion guards.

use chrono::NaiveDate;
use innkeeper::{
    Api, AppConfig, BookingRequest, BookingStatus, Error, FixedClock, MemoryStore, NewRoom, Role,
    RoomFilter, RoomStatus, RoomType, TokenAuthenticator,
};
use rust_decimal::Decimal;
use std::sync::Arc;

const ADMIN: &str = "tok-admin";
const GUEST: &str = "tok-guest";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn api() -> Api {
    let mut auth = TokenAuthenticator::new();
    auth.register(ADMIN, "Root", "root@example.com", Role::Admin);
    auth.register(GUEST, "Ada Lovelace", "ada@example.com", Role::User);
    Api::new(
        Arc::new(MemoryStore::new()),
        Arc::new(auth),
        Arc::new(FixedClock::at(date(2025, 6, 1))),
        AppConfig::default(),
    )
}

fn request(room_id: uuid::Uuid, check_in: NaiveDate, check_out: NaiveDate) -> BookingRequest {
    BookingRequest {
        room_id,
        guest_name: "A".into(),
        guest_email: "ada@example.com".into(),
        check_in,
        check_out,
    }
}

#[test]
fn full_booking_lifecycle() {
    let api = api();

    // Admin sets up room 101: Single at $100/night
    let room = api
        .create_room(
            ADMIN,
            NewRoom {
                number: "101".into(),
                room_type: RoomType::Single,
                price: Decimal::from(100),
                description: Some("Street-facing single".into()),
                amenities: vec!["wifi".into()],
                max_guests: 1,
            },
        )
        .unwrap();
    assert_eq!(room.status, RoomStatus::Available);

    // Guest books two nights
    let details = api
        .create_booking(GUEST, &request(room.id, date(2030, 1, 10), date(2030, 1, 12)))
        .unwrap();
    assert_eq!(details.booking.total_nights, 2);
    assert_eq!(details.booking.total_amount, Decimal::from(200));
    assert_eq!(details.booking.status, BookingStatus::Confirmed);
    assert_eq!(details.room.number, "101");
    assert_eq!(details.user.as_ref().unwrap().name, "Ada Lovelace");

    // The room-level status flag flips
    assert_eq!(api.get_room(room.id).unwrap().status, RoomStatus::Booked);

    // Any further booking on this room hits the status gate, even for a
    // non-overlapping range
    let err = api
        .create_booking(GUEST, &request(room.id, date(2030, 5, 1), date(2030, 5, 3)))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // Admin analytics see the confirmed revenue
    let page = api.list_bookings(ADMIN, None, None, None).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.analytics.confirmed_bookings, 1);
    assert_eq!(page.analytics.total_revenue, Decimal::from(200));

    // Deleting the room is blocked while the booking is active
    let err = api.delete_room(ADMIN, room.id).unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // Guest cancels; revenue drops out, the record stays
    let cancelled = api.cancel_booking(GUEST, details.booking.id).unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let page = api.list_bookings(ADMIN, None, None, None).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.analytics.total_bookings, 1);
    assert_eq!(page.analytics.confirmed_bookings, 0);
    assert_eq!(page.analytics.total_revenue, Decimal::ZERO);

    // Cancelling again is rejected
    assert!(matches!(
        api.cancel_booking(GUEST, details.booking.id),
        Err(Error::InvalidState(_))
    ));

    // The room still reads booked (no compensation on cancel), but with the
    // booking cancelled it can now be deleted
    assert_eq!(api.get_room(room.id).unwrap().status, RoomStatus::Booked);
    api.delete_room(ADMIN, room.id).unwrap();
    assert!(matches!(api.get_room(room.id), Err(Error::NotFound(_))));
}

#[test]
fn overlap_conflicts_between_guests() {
    let api = api();
    let room = api
        .create_room(
            ADMIN,
            NewRoom {
                number: "202".into(),
                room_type: RoomType::Double,
                price: Decimal::from(150),
                description: None,
                amenities: vec![],
                max_guests: 2,
            },
        )
        .unwrap();

    api.create_booking(GUEST, &request(room.id, date(2030, 1, 10), date(2030, 1, 15)))
        .unwrap();

    // Overlapping and boundary-touching requests are both conflicts
    let err = api
        .create_booking(GUEST, &request(room.id, date(2030, 1, 14), date(2030, 1, 18)))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let err = api
        .create_booking(GUEST, &request(room.id, date(2030, 1, 15), date(2030, 1, 18)))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // Snapshot pricing: raising the price later leaves the booking amount alone
    let patch = innkeeper::RoomPatch {
        price: Some(Decimal::from(500)),
        ..Default::default()
    };
    api.update_room(ADMIN, room.id, patch).unwrap();
    let mine = api.my_bookings(GUEST).unwrap();
    assert_eq!(mine.all_bookings[0].total_amount, Decimal::from(750));
}

#[test]
fn ranged_room_search_excludes_conflicts() {
    let api = api();
    for (number, price) in [("301", 100), ("302", 140)] {
        api.create_room(
            ADMIN,
            NewRoom {
                number: number.into(),
                room_type: RoomType::Suite,
                price: Decimal::from(price),
                description: None,
                amenities: vec![],
                max_guests: 4,
            },
        )
        .unwrap();
    }
    let listing = api.list_rooms(&RoomFilter::default(), None, None).unwrap();
    let suite = listing.rooms.iter().find(|r| r.number == "301").unwrap();

    api.create_booking(GUEST, &request(suite.id, date(2030, 2, 1), date(2030, 2, 5)))
        .unwrap();

    // The ranged search decides by overlap, not by the status flag
    let any_status = |status| RoomFilter {
        status,
        ..Default::default()
    };
    let free = api
        .list_rooms(
            &any_status(Some(RoomStatus::Booked)),
            Some(date(2030, 2, 4)),
            Some(date(2030, 2, 8)),
        )
        .unwrap();
    assert_eq!(free.count, 0);

    let free = api
        .list_rooms(
            &any_status(None),
            Some(date(2030, 2, 4)),
            Some(date(2030, 2, 8)),
        )
        .unwrap();
    assert_eq!(free.count, 1);
    assert_eq!(free.rooms[0].number, "302");
}
