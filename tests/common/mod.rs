#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use shareit::db;
use shareit::domain::{FixedClock, Item, NewItem, User};
use shareit::infrastructure::AppState;

/// 2025-01-01 at `hour:minute`
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

pub fn now() -> NaiveDateTime {
    at(0, 0)
}

// Helper to create a test app state with a clock frozen at `now()`
pub async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::with_clock(db, Arc::new(FixedClock(now())))
}

pub async fn create_user(state: &AppState, name: &str) -> User {
    state
        .user_repo
        .create(name.to_string(), format!("{}@example.com", name.to_lowercase()))
        .await
        .expect("Failed to create user")
}

pub async fn create_item(state: &AppState, owner: &User, name: &str, available: bool) -> Item {
    state
        .item_repo
        .create(NewItem {
            name: name.to_string(),
            description: format!("{} for loan", name),
            available,
            owner_id: owner.id,
            request_id: None,
        })
        .await
        .expect("Failed to create item")
}
