mod common;

use chrono::Duration;
use common::{at, create_item, create_user, now, setup_test_state};
use shareit::domain::{
    BookingStatus, CommentInput, CreateItemInput, CreateItemRequestInput, CreateUserInput,
    DomainError, NewBooking, PageRequest, UpdateItemInput, UpdateUserInput,
};
use shareit::infrastructure::AppState;

async fn store_booking(
    state: &AppState,
    item_id: i64,
    booker_id: i64,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    status: BookingStatus,
) -> i64 {
    state
        .booking_repo
        .create(NewBooking {
            start,
            end,
            item_id,
            booker_id,
            status,
        })
        .await
        .expect("Failed to store booking")
        .id
}

fn comment(text: &str) -> CommentInput {
    CommentInput {
        text: Some(text.to_string()),
    }
}

#[tokio::test]
async fn test_comment_requires_finished_approved_booking() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Tent", true).await;

    let denied = state
        .items
        .add_comment(item.id, booker.id, comment("Great tent"))
        .await;
    assert_eq!(
        denied,
        Err(DomainError::CommentNotAllowed {
            user_id: booker.id,
            item_id: item.id
        })
    );

    // A rejected booking in the past does not count
    store_booking(
        &state,
        item.id,
        booker.id,
        now() - Duration::days(3),
        now() - Duration::days(2),
        BookingStatus::Rejected,
    )
    .await;
    assert!(
        state
            .items
            .add_comment(item.id, booker.id, comment("Great tent"))
            .await
            .is_err()
    );

    store_booking(
        &state,
        item.id,
        booker.id,
        now() - Duration::days(2),
        now() - Duration::days(1),
        BookingStatus::Approved,
    )
    .await;

    let view = state
        .items
        .add_comment(item.id, booker.id, comment("Great tent"))
        .await
        .expect("comment allowed");
    assert_eq!(view.text, "Great tent");
    assert_eq!(view.author_name, "Booker");
    assert_eq!(view.created, now());

    let details = state.items.get(item.id, booker.id).await.expect("get");
    assert_eq!(details.comments.len(), 1);
    assert_eq!(details.comments[0].author_name, "Booker");
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let item = create_item(&state, &owner, "Tent", true).await;

    let result = state.items.add_comment(item.id, owner.id, comment("   ")).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_last_and_next_bookings_are_shown_to_owner_only() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Canoe", true).await;

    let older = store_booking(
        &state,
        item.id,
        booker.id,
        now() - Duration::days(5),
        now() - Duration::days(4),
        BookingStatus::Approved,
    )
    .await;
    let last = store_booking(
        &state,
        item.id,
        booker.id,
        now() - Duration::days(2),
        now() - Duration::days(1),
        BookingStatus::Approved,
    )
    .await;
    let next = store_booking(&state, item.id, booker.id, at(3, 0), at(4, 0), BookingStatus::Approved).await;
    let _later = store_booking(&state, item.id, booker.id, at(6, 0), at(7, 0), BookingStatus::Approved).await;
    // Waiting bookings never show up
    store_booking(&state, item.id, booker.id, at(1, 0), at(2, 0), BookingStatus::Waiting).await;

    let owner_view = state.items.get(item.id, owner.id).await.expect("owner view");
    let last_view = owner_view.last_booking.expect("last booking");
    assert_eq!(last_view.id, last);
    assert_ne!(last_view.id, older);
    assert_eq!(last_view.booker_id, booker.id);
    assert_eq!(owner_view.next_booking.expect("next booking").id, next);

    let booker_view = state.items.get(item.id, booker.id).await.expect("booker view");
    assert!(booker_view.last_booking.is_none());
    assert!(booker_view.next_booking.is_none());

    let listed = state
        .items
        .list_for_owner(owner.id, PageRequest::default())
        .await
        .expect("owner list");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].last_booking.is_some());
}

#[tokio::test]
async fn test_update_by_non_owner_is_rejected() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let other = create_user(&state, "Other").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let input = UpdateItemInput {
        available: Some(false),
        ..Default::default()
    };

    assert_eq!(
        state.items.update(other.id, item.id, input.clone()).await,
        Err(DomainError::NotItemOwner {
            user_id: other.id,
            item_id: item.id
        })
    );
    assert_eq!(
        state.items.update(999, item.id, input.clone()).await,
        Err(DomainError::UserNotFound(999))
    );

    let updated = state
        .items
        .update(owner.id, item.id, input)
        .await
        .expect("owner update");
    assert!(!updated.available);
    assert_eq!(updated.name, "Drill");
}

#[tokio::test]
async fn test_search_matches_available_items_ignoring_case() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    create_item(&state, &owner, "Power Drill", true).await;
    create_item(&state, &owner, "Old drill", false).await;
    create_item(&state, &owner, "Ladder", true).await;

    let found = state
        .items
        .search("DRILL", PageRequest::default())
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Power Drill");

    // Descriptions are "<name> for loan"
    let by_description = state
        .items
        .search("FOR LOAN", PageRequest::default())
        .await
        .expect("search");
    assert_eq!(by_description.len(), 2);

    let paged = state
        .items
        .search("for loan", PageRequest::new(1, 1).unwrap())
        .await
        .expect("paged search");
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].name, "Ladder");

    let blank = state
        .items
        .search("  ", PageRequest::default())
        .await
        .expect("blank");
    assert!(blank.is_empty());
}

#[tokio::test]
async fn test_create_item_validates_owner_and_request() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;

    let input = CreateItemInput {
        name: Some("Bike".to_string()),
        description: Some("City bike".to_string()),
        available: Some(true),
        request_id: None,
    };

    assert_eq!(
        state.items.create(999, input.clone()).await,
        Err(DomainError::UserNotFound(999))
    );
    assert_eq!(
        state
            .items
            .create(
                owner.id,
                CreateItemInput {
                    request_id: Some(77),
                    ..input.clone()
                }
            )
            .await,
        Err(DomainError::ItemRequestNotFound(77))
    );
    assert!(matches!(
        state
            .items
            .create(
                owner.id,
                CreateItemInput {
                    available: None,
                    ..input.clone()
                }
            )
            .await,
        Err(DomainError::Validation(_))
    ));

    let created = state.items.create(owner.id, input).await.expect("create");
    assert_eq!(created.name, "Bike");
    assert!(created.request_id.is_none());
}

#[tokio::test]
async fn test_item_requests_list_answers() {
    let state = setup_test_state().await;
    let lender = create_user(&state, "Lender").await;
    let asker = create_user(&state, "Asker").await;

    let request = state
        .requests
        .create(
            asker.id,
            CreateItemRequestInput {
                description: Some("Need a sewing machine".to_string()),
            },
        )
        .await
        .expect("create request");
    assert!(request.items.is_empty());
    assert_eq!(request.created, now());

    state
        .items
        .create(
            lender.id,
            CreateItemInput {
                name: Some("Sewing machine".to_string()),
                description: Some("Works fine".to_string()),
                available: Some(true),
                request_id: Some(request.id),
            },
        )
        .await
        .expect("answer request");

    let own = state.requests.list_own(asker.id).await.expect("own");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].items.len(), 1);
    assert_eq!(own[0].items[0].request_id, Some(request.id));

    let others = state
        .requests
        .list_others(lender.id, PageRequest::default())
        .await
        .expect("others");
    assert_eq!(others.len(), 1);
    assert!(
        state
            .requests
            .list_others(asker.id, PageRequest::default())
            .await
            .expect("none")
            .is_empty()
    );

    let fetched = state.requests.get(lender.id, request.id).await.expect("get");
    assert_eq!(fetched.description, "Need a sewing machine");

    assert_eq!(
        state.requests.get(lender.id, 999).await,
        Err(DomainError::ItemRequestNotFound(999))
    );
    assert_eq!(
        state.requests.list_own(999).await,
        Err(DomainError::UserNotFound(999))
    );
}

#[tokio::test]
async fn test_user_email_must_be_unique() {
    let state = setup_test_state().await;

    let ann = state
        .users
        .create(CreateUserInput {
            name: Some("Ann".to_string()),
            email: Some("ann@example.com".to_string()),
        })
        .await
        .expect("create ann");
    let bob = state
        .users
        .create(CreateUserInput {
            name: Some("Bob".to_string()),
            email: Some("bob@example.com".to_string()),
        })
        .await
        .expect("create bob");

    let duplicate = state
        .users
        .create(CreateUserInput {
            name: Some("Ann 2".to_string()),
            email: Some("ann@example.com".to_string()),
        })
        .await;
    assert_eq!(
        duplicate,
        Err(DomainError::EmailConflict("ann@example.com".to_string()))
    );

    let steal = state
        .users
        .update(
            bob.id,
            UpdateUserInput {
                name: None,
                email: Some("ann@example.com".to_string()),
            },
        )
        .await;
    assert!(matches!(steal, Err(DomainError::EmailConflict(_))));

    // Keeping one's own email is fine
    let renamed = state
        .users
        .update(
            ann.id,
            UpdateUserInput {
                name: Some("Annie".to_string()),
                email: Some("ann@example.com".to_string()),
            },
        )
        .await
        .expect("rename");
    assert_eq!(renamed.name, "Annie");

    state.users.delete(ann.id).await.expect("delete");
    state.users.delete(ann.id).await.expect("delete again");
    assert_eq!(
        state.users.get(ann.id).await,
        Err(DomainError::UserNotFound(ann.id))
    );
    assert_eq!(state.users.list().await.expect("list").len(), 1);
}
