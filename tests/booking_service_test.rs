mod common;

use chrono::Duration;
use common::{at, create_item, create_user, now, setup_test_state};
use shareit::domain::{
    BookingRequest, BookingState, BookingStatus, DomainError, NewBooking, PageRequest,
};

fn request(item_id: i64, start: chrono::NaiveDateTime, end: chrono::NaiveDateTime) -> BookingRequest {
    BookingRequest {
        start: Some(start),
        end: Some(end),
        item_id: Some(item_id),
    }
}

fn first_page() -> PageRequest {
    PageRequest::new(0, 10).unwrap()
}

#[tokio::test]
async fn test_equal_or_reversed_interval_is_rejected() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let same = state
        .bookings
        .create(booker.id, &request(item.id, at(3, 0), at(3, 0)))
        .await;
    assert!(matches!(same, Err(DomainError::InvalidInterval(_))));

    let reversed = state
        .bookings
        .create(booker.id, &request(item.id, at(4, 0), at(3, 0)))
        .await;
    assert!(matches!(reversed, Err(DomainError::InvalidInterval(_))));

    let past = state
        .bookings
        .create(booker.id, &request(item.id, now() - Duration::hours(1), at(3, 0)))
        .await;
    assert!(matches!(past, Err(DomainError::InvalidInterval(_))));
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let result = state
        .bookings
        .create(owner.id, &request(item.id, at(1, 0), at(2, 0)))
        .await;
    assert!(matches!(result, Err(DomainError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_unavailable_item_cannot_be_booked() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Projector", false).await;

    let result = state
        .bookings
        .create(booker.id, &request(item.id, at(1, 0), at(2, 0)))
        .await;
    assert_eq!(result, Err(DomainError::ItemNotAvailable(item.id)));
}

#[tokio::test]
async fn test_lookup_failures() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let unknown_item = state
        .bookings
        .create(owner.id, &request(999, at(1, 0), at(2, 0)))
        .await;
    assert!(matches!(unknown_item, Err(DomainError::ItemNotFound(_))));

    let unknown_user = state
        .bookings
        .create(4242, &request(item.id, at(1, 0), at(2, 0)))
        .await;
    assert_eq!(unknown_user, Err(DomainError::UserNotFound(4242)));
}

#[tokio::test]
async fn test_approve_then_reapprove_conflicts_and_reject_is_allowed() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let booking = state
        .bookings
        .create(booker.id, &request(item.id, at(1, 0), at(2, 0)))
        .await
        .expect("create");
    assert_eq!(booking.status, "WAITING");

    let approved = state
        .bookings
        .approve(booking.id, true, owner.id)
        .await
        .expect("approve");
    assert_eq!(approved.status, "APPROVED");

    let again = state.bookings.approve(booking.id, true, owner.id).await;
    assert_eq!(again, Err(DomainError::BookingStatusConflict(booking.id)));

    let rejected = state
        .bookings
        .approve(booking.id, false, owner.id)
        .await
        .expect("reject");
    assert_eq!(rejected.status, "REJECTED");
}

#[tokio::test]
async fn test_only_owner_can_approve() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let booking = state
        .bookings
        .create(booker.id, &request(item.id, at(1, 0), at(2, 0)))
        .await
        .expect("create");

    let by_booker = state.bookings.approve(booking.id, true, booker.id).await;
    assert!(matches!(by_booker, Err(DomainError::BookingNotFound(_))));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let stranger = create_user(&state, "Stranger").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let created = state
        .bookings
        .create(booker.id, &request(item.id, at(1, 0), at(2, 0)))
        .await
        .expect("create");

    let fetched = state
        .bookings
        .get(created.id, booker.id)
        .await
        .expect("booker can read");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.start, at(1, 0));
    assert_eq!(fetched.end, at(2, 0));
    assert_eq!(fetched.status, "WAITING");
    assert_eq!(fetched.booker.id, booker.id);
    assert_eq!(fetched.item.name, "Drill");

    assert!(state.bookings.get(created.id, owner.id).await.is_ok());
    assert!(matches!(
        state.bookings.get(created.id, stranger.id).await,
        Err(DomainError::BookingNotFound(_))
    ));
}

#[tokio::test]
async fn test_booking_scenario_with_state_filters() {
    let state = setup_test_state().await;
    let u1 = create_user(&state, "U1").await;
    let u2 = create_user(&state, "U2").await;
    let item = create_item(&state, &u1, "Kayak", true).await;

    let booking = state
        .bookings
        .create(u2.id, &request(item.id, at(1, 0), at(2, 0)))
        .await
        .expect("create");
    assert_eq!(booking.status, "WAITING");

    let approved = state
        .bookings
        .approve(booking.id, true, u1.id)
        .await
        .expect("approve");
    assert_eq!(approved.status, "APPROVED");

    assert_eq!(
        state.bookings.approve(booking.id, true, u1.id).await,
        Err(DomainError::BookingStatusConflict(booking.id))
    );

    let waiting = state
        .bookings
        .list_for_booker(u2.id, BookingState::Waiting, first_page())
        .await
        .expect("list waiting");
    assert!(waiting.is_empty());

    let all = state
        .bookings
        .list_for_booker(u2.id, BookingState::All, first_page())
        .await
        .expect("list all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, booking.id);

    let future = state
        .bookings
        .list_for_owner(u1.id, BookingState::Future, first_page())
        .await
        .expect("owner future");
    assert_eq!(future.len(), 1);
}

#[tokio::test]
async fn test_lists_are_sorted_by_end_descending() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let drill = create_item(&state, &owner, "Drill", true).await;
    let saw = create_item(&state, &owner, "Saw", true).await;

    for (item_id, start, end) in [
        (drill.id, at(1, 0), at(9, 0)),
        (saw.id, at(2, 0), at(3, 0)),
        (drill.id, at(5, 0), at(6, 0)),
        (saw.id, at(4, 0), at(12, 0)),
    ] {
        state
            .bookings
            .create(booker.id, &request(item_id, start, end))
            .await
            .expect("create");
    }

    for list in [
        state
            .bookings
            .list_for_booker(booker.id, BookingState::All, first_page())
            .await
            .expect("booker list"),
        state
            .bookings
            .list_for_owner(owner.id, BookingState::Waiting, first_page())
            .await
            .expect("owner list"),
    ] {
        assert_eq!(list.len(), 4);
        assert!(list.windows(2).all(|w| w[0].end >= w[1].end));
        assert_eq!(list[0].end, at(12, 0));
    }
}

#[tokio::test]
async fn test_current_and_past_states_use_the_clock() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    // Stored directly: the creation rules forbid past intervals
    for (start, end, status) in [
        (now() - Duration::hours(1), now() + Duration::hours(1), BookingStatus::Waiting),
        (now() - Duration::hours(5), now() - Duration::hours(3), BookingStatus::Rejected),
    ] {
        state
            .booking_repo
            .create(NewBooking {
                start,
                end,
                item_id: item.id,
                booker_id: booker.id,
                status,
            })
            .await
            .expect("insert");
    }

    let current = state
        .bookings
        .list_for_booker(booker.id, BookingState::Current, first_page())
        .await
        .expect("current");
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].status, "WAITING");

    let past = state
        .bookings
        .list_for_booker(booker.id, BookingState::Past, first_page())
        .await
        .expect("past");
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].status, "REJECTED");

    let rejected = state
        .bookings
        .list_for_owner(owner.id, BookingState::Rejected, first_page())
        .await
        .expect("rejected");
    assert_eq!(rejected.len(), 1);
}

#[tokio::test]
async fn test_empty_page_is_not_found_and_unknown_booker_fails() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    let none_yet = state
        .bookings
        .list_for_booker(booker.id, BookingState::All, first_page())
        .await;
    assert!(matches!(none_yet, Err(DomainError::BookingNotFound(_))));

    state
        .bookings
        .create(booker.id, &request(item.id, at(1, 0), at(2, 0)))
        .await
        .expect("create");

    let second_page = state
        .bookings
        .list_for_booker(booker.id, BookingState::All, PageRequest::new(10, 10).unwrap())
        .await;
    assert!(matches!(second_page, Err(DomainError::BookingNotFound(_))));

    let unknown = state
        .bookings
        .list_for_booker(999, BookingState::All, first_page())
        .await;
    assert_eq!(unknown, Err(DomainError::UserNotFound(999)));
}

#[tokio::test]
async fn test_page_bounds_the_raw_fetch() {
    let state = setup_test_state().await;
    let owner = create_user(&state, "Owner").await;
    let booker = create_user(&state, "Booker").await;
    let item = create_item(&state, &owner, "Drill", true).await;

    for hour in 1..=3 {
        state
            .bookings
            .create(booker.id, &request(item.id, at(hour, 0), at(hour, 30)))
            .await
            .expect("create");
    }

    // Raw fetch is ordered by start descending: page 0 of size 2 holds the 03:00 and 02:00 bookings
    let page = state
        .bookings
        .list_for_booker(booker.id, BookingState::All, PageRequest::new(0, 2).unwrap())
        .await
        .expect("first page");
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].start, at(3, 0));

    let next = state
        .bookings
        .list_for_booker(booker.id, BookingState::All, PageRequest::new(2, 2).unwrap())
        .await
        .expect("second page");
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].start, at(1, 0));
}
