use std::collections::HashSet;

use sea_orm::{
    Condition, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};

use crate::{DateRange, ResultEngine, Room, RoomAvailability, bookings, rooms};

use super::{Engine, with_tx};

/// Active bookings whose range overlaps `range` (inclusive on both ends).
pub(super) fn overlapping(range: DateRange) -> Condition {
    Condition::all()
        .add(bookings::Column::IsDeleted.eq(false))
        .add(bookings::Column::StartDate.lte(range.end()))
        .add(bookings::Column::EndDate.gte(range.start()))
}

impl Engine {
    /// Availability of every room for `range`.
    ///
    /// Rooms come back ordered by category, then room id. Availability is
    /// derived from the booking ledger only; the cached `is_booked` flag of
    /// the room is passed through untouched and never consulted.
    pub async fn check_availability(
        &self,
        range: DateRange,
    ) -> ResultEngine<Vec<RoomAvailability>> {
        with_tx!(self, |db_tx| {
            let room_models = rooms::Entity::find()
                .order_by_asc(rooms::Column::Category)
                .order_by_asc(rooms::Column::Rid)
                .all(&db_tx)
                .await?;

            let booked: HashSet<i64> = bookings::Entity::find()
                .select_only()
                .column(bookings::Column::Rid)
                .filter(overlapping(range))
                .distinct()
                .into_tuple::<i64>()
                .all(&db_tx)
                .await?
                .into_iter()
                .collect();

            Ok(annotate(room_models.into_iter().map(Room::from), &booked))
        })
    }
}

fn annotate(rooms: impl Iterator<Item = Room>, booked: &HashSet<i64>) -> Vec<RoomAvailability> {
    rooms
        .map(|room| {
            let available = !booked.contains(&room.rid);
            RoomAvailability { room, available }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_ignores_cached_flag() {
        let mut stale = Room::new(101, "Garden", "Deluxe", 100).unwrap();
        stale.is_booked = true;
        let free = Room::new(102, "Sea", "Deluxe", 100).unwrap();

        let out = annotate(vec![stale, free].into_iter(), &HashSet::from([102]));
        assert!(out[0].available);
        assert!(out[0].room.is_booked);
        assert!(!out[1].available);
    }
}
