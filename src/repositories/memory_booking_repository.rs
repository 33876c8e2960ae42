use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingRepository, StoreError};
use crate::models::booking::{Booking, NewBooking};
use crate::schemas::booking_schema::ValidatedBooking;

struct Entry {
    seq: u64,
    booking: Booking,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    entries: Vec<Entry>,
}

/// In-process booking store, selected with `DATABASE_URL=memory://`.
///
/// Ids are fresh v4 UUIDs and nothing else is unique, so `create` never reports
/// `StoreError::Conflict`.
#[derive(Default)]
pub struct MemoryBookingRepository {
    inner: RwLock<Inner>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    #[tracing::instrument(name = "Insert booking (memory)", skip_all)]
    async fn create(&self, input: ValidatedBooking) -> Result<Booking, StoreError> {
        let new_booking = NewBooking::new(input)?;
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            name: new_booking.name,
            email: new_booking.email,
            phone: new_booking.phone,
            check_in_date: new_booking.check_in_date,
            check_out_date: new_booking.check_out_date,
            guests: new_booking.guests,
            message: new_booking.message,
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.push(Entry {
            seq,
            booking: booking.clone(),
        });
        tracing::debug!(booking.id = %booking.id, "booking stored");

        Ok(booking)
    }

    #[tracing::instrument(name = "Fetch all bookings (memory)", skip_all)]
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.read().await;
        let mut ordered: Vec<&Entry> = inner.entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.booking
                .created_at
                .cmp(&a.booking.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(ordered.into_iter().map(|e| e.booking.clone()).collect())
    }

    #[tracing::instrument(name = "Delete booking by id (memory)", skip(self))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = Uuid::parse_str(id).map_err(|_| StoreError::InvalidId)?;

        let mut inner = self.inner.write().await;
        let position = inner
            .entries
            .iter()
            .position(|e| e.booking.id == id)
            .ok_or(StoreError::NotFound)?;
        inner.entries.remove(position);

        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }
}
