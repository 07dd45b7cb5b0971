//! Cross-reference resolution.
//!
//! Client-side joins over fully fetched collections: related records by foreign-key
//! equality, display names through a second lookup, and counts over the related subset.
//! Collections are small, so every lookup is a linear scan.

use crate::models::{Assignment, Datacenter, Entity, EntityRef, Host, IpAddress, Server};
use crate::table::Record;

/// Records of `collection` whose foreign key equals `id`, in collection order.
pub fn related<'a, T, F>(collection: &'a [T], id: &str, foreign_key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    collection
        .iter()
        .filter(|record| foreign_key(record) == Some(id))
        .collect()
}

/// The record with identifier `id`.
pub fn find_by_id<'a, T: Record>(collection: &'a [T], id: &str) -> Option<&'a T> {
    collection.iter().find(|record| record.id() == id)
}

/// Display name of the record `id` refers to, or `id` itself when it dangles.
pub fn display_name<'a, E: Entity>(collection: &'a [E], id: &'a str) -> &'a str {
    find_by_id(collection, id).map_or(id, E::display_name)
}

/// [`display_name`] for an optional foreign key; `None` stays `None`.
pub fn optional_display_name<'a, E: Entity>(
    collection: &'a [E],
    id: Option<&'a str>,
) -> Option<&'a str> {
    id.map(|id| display_name(collection, id))
}

/// Number of records satisfying `predicate`.
pub fn count_where<T>(records: &[&T], predicate: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|record| predicate(record)).count()
}

/// Assignments targeting exactly `target`: kind first, then identifier.
pub fn assignments_for<'a>(assignments: &'a [Assignment], target: &EntityRef) -> Vec<&'a Assignment> {
    assignments
        .iter()
        .filter(|a| a.target.kind() == target.kind() && a.target.id() == target.id())
        .collect()
}

/// Collections an assignment target can live in.
#[derive(Debug, Clone, Copy)]
pub struct TargetCollections<'a> {
    pub datacenters: &'a [Datacenter],
    pub servers: &'a [Server],
    pub hosts: &'a [Host],
    pub ip_addresses: &'a [IpAddress],
}

impl<'a> TargetCollections<'a> {
    /// Resolve the display name of an assignment target in the collection its kind selects.
    pub fn display_name(&self, target: &'a EntityRef) -> &'a str {
        match target {
            EntityRef::Datacenter(id) => display_name(self.datacenters, id),
            EntityRef::Server(id) => display_name(self.servers, id),
            EntityRef::Host(id) => display_name(self.hosts, id),
            EntityRef::Ip(id) => display_name(self.ip_addresses, id),
        }
    }

}
