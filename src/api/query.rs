//! Query-string parameters shared by the backend handlers and the gateway

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{BookingState, DomainError, PageRequest};

/// `?state=&from=&size=` on booking lists
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// ALL, CURRENT, FUTURE, PAST, WAITING or REJECTED (case-insensitive)
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl BookingListQuery {
    pub fn state(&self) -> Result<BookingState, DomainError> {
        match &self.state {
            Some(state) => state.parse(),
            None => Ok(BookingState::All),
        }
    }

    pub fn page(&self) -> Result<PageRequest, DomainError> {
        PageRequest::with_defaults(self.from, self.size)
    }
}

/// `?approved=` on booking approval
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// `?from=&size=`, defaulting to 0 and 10
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<PageRequest, DomainError> {
        PageRequest::with_defaults(self.from, self.size)
    }
}

/// `?text=&from=&size=` on item search
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl SearchQuery {
    pub fn page(&self) -> Result<PageRequest, DomainError> {
        PageRequest::with_defaults(self.from, self.size)
    }
}
