//! Demo data for local runs (`SEED_DEMO=1`)

use crate::domain::{DomainError, NewItem, User};
use crate::infrastructure::AppState;

const DEMO_USERS: [(&str, &str); 3] = [
    ("Alice", "alice@shareit.local"),
    ("Bob", "bob@shareit.local"),
    ("Carol", "carol@shareit.local"),
];

const DEMO_ITEMS: [(usize, &str, &str, bool); 4] = [
    (0, "Cordless drill", "18V drill with two batteries", true),
    (0, "Ladder", "Aluminium ladder, 3 m", true),
    (1, "Tent", "Two-person camping tent", true),
    (2, "Projector", "Full HD projector with HDMI cable", false),
];

/// Insert demo users and their items. Users whose email already exists are
/// left untouched, and their items are not inserted again.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    let mut users: Vec<(User, bool)> = Vec::new();

    for (name, email) in DEMO_USERS {
        match state.user_repo.find_by_email(email).await? {
            Some(existing) => users.push((existing, false)),
            None => {
                let user = state
                    .user_repo
                    .create(name.to_string(), email.to_string())
                    .await?;
                users.push((user, true));
            }
        }
    }

    for (owner, name, description, available) in DEMO_ITEMS {
        let Some((user, created)) = users.get(owner) else {
            continue;
        };
        if !created {
            continue;
        }

        state
            .item_repo
            .create(NewItem {
                name: name.to_string(),
                description: description.to_string(),
                available,
                owner_id: user.id,
                request_id: None,
            })
            .await?;
    }

    tracing::debug!("Seeded {} demo users", users.iter().filter(|(_, c)| *c).count());
    Ok(())
}
