use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use super::{BookingRepository, StoreError};
use crate::models::booking::{Booking, NewBooking};
use crate::schemas::booking_schema::ValidatedBooking;

/// MySQL error codes that mean the row itself was unacceptable.
const CONSTRAINT_ERROR_CODES: [&str; 7] = ["1048", "1264", "1265", "1292", "1366", "1406", "3819"];
const DUPLICATE_ENTRY_CODE: &str = "1062";
const CHECK_CONSTRAINT_CODE: &str = "3819";

#[derive(sqlx::FromRow, Debug)]
struct BookingRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    check_in_date: DateTime<Utc>,
    check_out_date: DateTime<Utc>,
    guests: i64,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = uuid::Error;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            id,
            name,
            email,
            phone,
            check_in_date,
            check_out_date,
            guests,
            message,
            created_at,
            updated_at,
        } = row;
        Ok(Booking {
            id: Uuid::parse_str(&id)?,
            name,
            email,
            phone,
            check_in_date,
            check_out_date,
            guests,
            message,
            created_at,
            updated_at,
        })
    }
}

const SELECT_BOOKING: &str = r#"
    SELECT id, name, email, phone, check_in_date, check_out_date, guests, message, created_at, updated_at
    FROM bookings
"#;

/// Booking store backed by the `bookings` MySQL table.
#[derive(Clone)]
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn backend(action: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |e| StoreError::Backend {
        action,
        source: Box::new(e),
    }
}

/// Map a MySQL error code to the store error a caller may see. The database's own
/// message names tables and columns, so it never goes into the result.
fn classify_code(code: &str) -> Option<StoreError> {
    match code {
        DUPLICATE_ENTRY_CODE => Some(StoreError::Conflict),
        CHECK_CONSTRAINT_CODE => Some(StoreError::Invalid(
            "Check-out date must be after check-in date".to_string(),
        )),
        code if CONSTRAINT_ERROR_CODES.contains(&code) => {
            Some(StoreError::Invalid("Invalid booking data".to_string()))
        }
        _ => None,
    }
}

/// Classify a failed write by the database error code.
fn classify_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(code) = db_err.code() {
            if let Some(classified) = classify_code(&code) {
                tracing::warn!(error.code = %code, error.message = %db_err.message(), "booking write rejected by storage");
                return classified;
            }
        }
    }
    backend("create booking")(e)
}

fn into_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, StoreError> {
    rows.into_iter()
        .map(|row| {
            Booking::try_from(row).map_err(|e| StoreError::Backend {
                action: "decode booking",
                source: Box::new(e),
            })
        })
        .collect()
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    #[tracing::instrument(name = "Insert booking", skip_all)]
    async fn create(&self, input: ValidatedBooking) -> Result<Booking, StoreError> {
        let new_booking = NewBooking::new(input)?;
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO bookings (id, name, email, phone, check_in_date, check_out_date, guests, message)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&new_booking.name)
        .bind(&new_booking.email)
        .bind(&new_booking.phone)
        .bind(new_booking.check_in_date)
        .bind(new_booking.check_out_date)
        .bind(new_booking.guests)
        .bind(&new_booking.message)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        // Fetch the stored row to pick up the storage timestamps
        let row = sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(backend("fetch created booking"))?;

        into_bookings(vec![row])?
            .pop()
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(name = "Fetch all bookings", skip_all)]
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING} ORDER BY created_at DESC, seq DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend("fetch bookings"))?;

        into_bookings(rows)
    }

    #[tracing::instrument(name = "Delete booking by id", skip(self))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = Uuid::parse_str(id).map_err(|_| StoreError::InvalidId)?;

        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend("delete booking"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
