//! Offset/limit paging as exposed through `from` and `size` query parameters.
//!
//! `from` is rounded down to a page boundary: `from=7, size=5` reads page 1,
//! i.e. rows 5..10.

use super::DomainError;

pub const DEFAULT_FROM: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(from: i64, size: i64) -> Result<Self, DomainError> {
        if from < 0 {
            return Err(DomainError::Validation(format!(
                "from must be zero or positive, got {}",
                from
            )));
        }
        if size < 1 {
            return Err(DomainError::Validation(format!(
                "size must be positive, got {}",
                size
            )));
        }
        let (from, size) = (from as u64, size as u64);
        Ok(Self {
            page: from / size,
            size,
        })
    }

    /// Missing parameters fall back to `from=0` and `size=10`
    pub fn with_defaults(from: Option<i64>, size: Option<i64>) -> Result<Self, DomainError> {
        Self::new(from.unwrap_or(DEFAULT_FROM), size.unwrap_or(DEFAULT_SIZE))
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn offset(&self) -> u64 {
        self.page * self.size
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_SIZE as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_is_rounded_down_to_page_boundary() {
        let page = PageRequest::new(7, 5).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.limit(), 5);
    }

    #[test]
    fn rejects_negative_from_and_non_positive_size() {
        assert!(matches!(
            PageRequest::new(-1, 10),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn missing_parameters_use_the_first_page_of_ten() {
        assert_eq!(
            PageRequest::with_defaults(None, None).unwrap(),
            PageRequest::default()
        );
        let page = PageRequest::with_defaults(Some(20), None).unwrap();
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }
}
