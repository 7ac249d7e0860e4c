//! Typed ID definitions for all barcamp entities.
//!
//! Each ID type has a unique prefix identifying the entity type.
//! IDs are ULID-based for sortability and uniqueness.

use crate::define_id;

define_id!(EventId, "evt");
define_id!(SessionId, "ses");
define_id!(RoomId, "room");
define_id!(TimeSlotId, "slot");
