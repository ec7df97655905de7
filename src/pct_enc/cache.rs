//! Memoized tables for caller-supplied safe sets.

use super::Table;
use std::{
    collections::HashMap,
    sync::{LazyLock, PoisonError, RwLock},
};

// Entries are never removed or modified, so a poisoned lock still holds
// consistent data.
static TABLES: LazyLock<RwLock<HashMap<Box<str>, Table>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub(super) fn table_for(safe: &str) -> Table {
    if safe.is_empty() {
        return super::table::UNRESERVED;
    }

    if let Some(&table) = TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(safe)
    {
        return table;
    }

    let table = Table::with_safe(safe);
    TABLES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(safe.into())
        .or_insert(table);
    table
}
