//! In-memory store backend.
//!
//! Keeps rooms and bookings in `RwLock`-guarded maps. An insertion sequence
//! number gives listings a stable newest-first order even when two records
//! share a creation timestamp.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::model::{Booking, BookingStatus, Room, RoomFilter};

#[derive(Default)]
pub struct MemoryStore {
    rooms: RwLock<HashMap<Uuid, (u64, Room)>>,
    bookings: RwLock<HashMap<Uuid, (u64, Booking)>>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

// Lock poisoning means a writer panicked mid-operation; surface it as a
// backend failure instead of propagating the panic.
fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("store lock poisoned".into())
}

fn newest_first<T: Clone>(mut entries: Vec<(u64, T)>) -> Vec<T> {
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries.into_iter().map(|(_, record)| record).collect()
}

impl Store for MemoryStore {
    fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        rooms.insert(room.id, (self.next_seq(), room));
        Ok(())
    }

    fn room(&self, id: Uuid) -> Result<Option<Room>, StoreError> {
        let rooms = self.rooms.read().map_err(poisoned)?;
        Ok(rooms.get(&id).map(|(_, room)| room.clone()))
    }

    fn room_by_number(&self, number: &str) -> Result<Option<Room>, StoreError> {
        let rooms = self.rooms.read().map_err(poisoned)?;
        Ok(rooms
            .values()
            .find(|(_, room)| room.number == number)
            .map(|(_, room)| room.clone()))
    }

    fn save_room(&self, room: &Room) -> Result<(), StoreError> {
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        match rooms.get_mut(&room.id) {
            Some(slot) => {
                slot.1 = room.clone();
                Ok(())
            }
            None => Err(StoreError::RecordNotFound),
        }
    }

    fn remove_room(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        rooms.remove(&id).map(|_| ()).ok_or(StoreError::RecordNotFound)
    }

    fn rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError> {
        let rooms = self.rooms.read().map_err(poisoned)?;
        let matching = rooms
            .values()
            .filter(|(_, room)| {
                filter.room_type.map_or(true, |t| room.room_type == t)
                    && filter.status.map_or(true, |s| room.status == s)
                    && filter.min_price.map_or(true, |min| room.price >= min)
                    && filter.max_price.map_or(true, |max| room.price <= max)
            })
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    fn insert_booking(&self, booking: Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().map_err(poisoned)?;
        bookings.insert(booking.id, (self.next_seq(), booking));
        Ok(())
    }

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        Ok(bookings.get(&id).map(|(_, booking)| booking.clone()))
    }

    fn save_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().map_err(poisoned)?;
        match bookings.get_mut(&booking.id) {
            Some(slot) => {
                slot.1 = booking.clone();
                Ok(())
            }
            None => Err(StoreError::RecordNotFound),
        }
    }

    fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        let matching = bookings
            .values()
            .filter(|(_, b)| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    fn bookings_for_room(&self, room_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        let matching = bookings
            .values()
            .filter(|(_, b)| b.room_id == room_id)
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    fn bookings_page(
        &self,
        status: Option<BookingStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        let matching: Vec<_> = bookings
            .values()
            .filter(|(_, b)| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect();
        Ok(newest_first(matching)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn count_bookings(&self, status: Option<BookingStatus>) -> Result<u64, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        Ok(bookings
            .values()
            .filter(|(_, b)| status.map_or(true, |s| b.status == s))
            .count() as u64)
    }

    fn booking_revenue(&self, status: BookingStatus) -> Result<Decimal, StoreError> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        Ok(bookings
            .values()
            .filter(|(_, b)| b.status == status)
            .map(|(_, b)| b.total_amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaymentStatus, RoomStatus, RoomType};
    use chrono::{NaiveDate, Utc};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::FirstName;
    use fake::Fake;

    fn room(number: &str, price: i64) -> Room {
        Room {
            id: Uuid::new_v4(),
            number: number.into(),
            room_type: RoomType::Single,
            price: Decimal::from(price),
            status: RoomStatus::Available,
            description: None,
            amenities: vec![],
            max_guests: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking(room_id: Uuid, status: BookingStatus, amount: i64) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            room_id,
            guest_name: FirstName().fake(),
            guest_email: SafeEmail().fake(),
            check_in: NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2030, 1, 12).unwrap(),
            total_nights: 2,
            total_amount: Decimal::from(amount),
            status,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rooms_list_newest_first_with_filters() {
        let store = MemoryStore::new();
        store.insert_room(room("101", 100)).unwrap();
        store.insert_room(room("102", 200)).unwrap();
        store.insert_room(room("103", 300)).unwrap();

        let all = store.rooms(&RoomFilter::default()).unwrap();
        let numbers: Vec<_> = all.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["103", "102", "101"]);

        let filter = RoomFilter {
            min_price: Some(Decimal::from(150)),
            max_price: Some(Decimal::from(250)),
            ..Default::default()
        };
        let mid = store.rooms(&filter).unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].number, "102");
    }

    #[test]
    fn save_on_missing_record_reports_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.save_room(&room("101", 100)).unwrap_err(),
            StoreError::RecordNotFound
        );
        assert_eq!(
            store.remove_room(Uuid::new_v4()).unwrap_err(),
            StoreError::RecordNotFound
        );
        let b = booking(Uuid::new_v4(), BookingStatus::Confirmed, 100);
        assert_eq!(store.save_booking(&b).unwrap_err(), StoreError::RecordNotFound);
    }

    #[test]
    fn booking_counts_and_revenue_by_status() {
        let store = MemoryStore::new();
        let room_id = Uuid::new_v4();
        store
            .insert_booking(booking(room_id, BookingStatus::Confirmed, 200))
            .unwrap();
        store
            .insert_booking(booking(room_id, BookingStatus::Confirmed, 300))
            .unwrap();
        store
            .insert_booking(booking(room_id, BookingStatus::Cancelled, 999))
            .unwrap();

        assert_eq!(store.count_bookings(None).unwrap(), 3);
        assert_eq!(
            store.count_bookings(Some(BookingStatus::Confirmed)).unwrap(),
            2
        );
        assert_eq!(
            store.booking_revenue(BookingStatus::Confirmed).unwrap(),
            Decimal::from(500)
        );
    }

    #[test]
    fn paging_walks_newest_first() {
        let store = MemoryStore::new();
        let room_id = Uuid::new_v4();
        let mut ids = vec![];
        for _ in 0..5 {
            let b = booking(room_id, BookingStatus::Confirmed, 100);
            ids.push(b.id);
            store.insert_booking(b).unwrap();
        }

        let first = store.bookings_page(None, 0, 2).unwrap();
        let second = store.bookings_page(None, 2, 2).unwrap();
        let third = store.bookings_page(None, 4, 2).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(third.len(), 1);
        assert_eq!(first[0].id, ids[4]);
        assert_eq!(third[0].id, ids[0]);
    }
}
