use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::bookings::create_booking,
        api::bookings::approve_booking,
        api::bookings::get_booking,
        api::bookings::list_booker_bookings,
        api::bookings::list_owner_bookings,
        api::users::create_user,
        api::users::update_user,
        api::users::get_user,
        api::users::list_users,
        api::users::delete_user,
        api::items::create_item,
        api::items::update_item,
        api::items::get_item,
        api::items::list_items,
        api::items::search_items,
        api::items::add_comment,
        api::requests::create_request,
        api::requests::list_own_requests,
        api::requests::list_other_requests,
        api::requests::get_request,
    ),
    tags(
        (name = "shareit", description = "ShareIt item sharing API")
    )
)]
pub struct ApiDoc;
