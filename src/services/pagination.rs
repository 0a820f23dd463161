use sea_orm::{ConnectionTrait, DbErr, ItemsAndPagesNumber, PaginatorTrait, SelectorTrait};

use crate::errors::{CoreError, CoreResult};

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// A 1-indexed page request. The page number is kept as given and only
/// clamped once the total is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page: i32, page_size: i32) -> CoreResult<Self> {
        if page_size < 1 {
            return Err(CoreError::field(
                "page_size",
                "Ensure this value is greater than or equal to 1.",
            ));
        }

        Ok(Self {
            page: i64::from(page),
            page_size: page_size as u64,
        })
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of pages for `total` items; an empty result still has one page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size).max(1)
    }

    /// The requested page moved into `1..=num_pages`.
    pub fn effective_page(&self, total: u64) -> u64 {
        let last = self.num_pages(total);
        if self.page < 1 {
            1
        } else {
            (self.page as u64).min(last)
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: i64::from(DEFAULT_PAGE),
            page_size: DEFAULT_PAGE_SIZE as u64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub num_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            num_pages: self.num_pages,
        }
    }
}

/// Count the query, clamp the requested page, then fetch that slice.
pub async fn fetch_page<'db, C, S>(
    db: &'db C,
    select: S,
    request: PageRequest,
) -> Result<Page<<S::Selector as SelectorTrait>::Item>, DbErr>
where
    C: ConnectionTrait,
    S: PaginatorTrait<'db, C>,
{
    let paginator = select.paginate(db, request.page_size());
    let ItemsAndPagesNumber {
        number_of_items, ..
    } = paginator.num_items_and_pages().await?;

    let page = request.effective_page(number_of_items);
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        page_size: request.page_size(),
        total: number_of_items,
        num_pages: request.num_pages(number_of_items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreErrorKind;

    #[test]
    fn page_size_must_be_positive() {
        let err = PageRequest::new(1, 0).unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::Validation);
        assert!(err.field_errors().unwrap().contains_key("page_size"));
        assert!(PageRequest::new(1, -5).is_err());
    }

    #[test]
    fn num_pages_is_never_zero() {
        let request = PageRequest::new(1, 5).unwrap();
        assert_eq!(request.num_pages(0), 1);
        assert_eq!(request.num_pages(5), 1);
        assert_eq!(request.num_pages(6), 2);
        assert_eq!(request.num_pages(12), 3);
    }

    #[test]
    fn out_of_range_pages_clamp_to_nearest_valid_page() {
        assert_eq!(PageRequest::new(0, 5).unwrap().effective_page(12), 1);
        assert_eq!(PageRequest::new(-3, 5).unwrap().effective_page(12), 1);
        assert_eq!(PageRequest::new(2, 5).unwrap().effective_page(12), 2);
        assert_eq!(PageRequest::new(9, 5).unwrap().effective_page(12), 3);
        assert_eq!(PageRequest::new(4, 5).unwrap().effective_page(0), 1);
    }

    #[test]
    fn defaults_match_the_query_arguments() {
        let request = PageRequest::default();
        assert_eq!(request, PageRequest::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).unwrap());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 2,
            page_size: 3,
            total: 7,
            num_pages: 3,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!((mapped.page, mapped.total, mapped.num_pages), (2, 7, 3));
    }
}
