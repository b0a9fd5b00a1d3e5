// src/core/pagination.rs
//! Fixed-size, 1-indexed pages over a filtered list

pub const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// 1-based position of the first item shown, 0 when nothing is shown
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item shown
    pub fn last_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_position() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Page(Page<T>),
    /// Requested page is past the last page of a non-empty list; the client
    /// must be sent back to page 1.
    Redirect,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> PageOutcome<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_pages = total_pages(items.len(), page_size);

    if total_pages > 0 && page > total_pages {
        return PageOutcome::Redirect;
    }

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    PageOutcome::Page(Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_pages,
        total_items: items.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// Page numbers for the navigation bar: every page when there are few,
/// otherwise first, last and the neighbours of `current` with ellipses.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageLink::Number).collect();
    }

    let mut start = 2usize.max(current.saturating_sub(1));
    let mut end = (total - 1).min(current + 1);

    if current <= 2 {
        end = (total - 1).min(4);
    }
    if current >= total - 1 {
        start = 2usize.max(total - 3);
    }

    let mut links = vec![PageLink::Number(1)];
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(PageLink::Number));
    if end < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Number(total));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Number};

    fn expect_page<T: std::fmt::Debug>(outcome: PageOutcome<T>) -> Page<T> {
        match outcome {
            PageOutcome::Page(page) => page,
            PageOutcome::Redirect => panic!("unexpected redirect"),
        }
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for len in [0usize, 1, 19, 20, 21, 40, 53] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, 20);
            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                rebuilt.extend(expect_page(paginate(&items, 20, page)).items);
            }
            assert_eq!(rebuilt, items, "len {}", len);
            assert_eq!(pages == 0, len == 0);
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }

    #[test]
    fn page_past_the_end_redirects() {
        let items: Vec<u8> = vec![0; 25];
        assert_eq!(paginate(&items, 20, 3), PageOutcome::Redirect);
        assert!(matches!(paginate(&items, 20, 2), PageOutcome::Page(_)));
    }

    #[test]
    fn empty_list_never_redirects() {
        let items: Vec<u8> = Vec::new();
        let page = expect_page(paginate(&items, 20, 4));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn huge_page_on_empty_list_is_an_empty_page() {
        let items: Vec<u8> = Vec::new();
        let page = expect_page(paginate(&items, 20, usize::MAX));
        assert!(page.items.is_empty());
        assert_eq!(page.first_position(), 0);
        assert_eq!(page.last_position(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let items: Vec<u8> = (0..5).collect();
        let page = expect_page(paginate(&items, 2, 0));
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![0, 1]);
    }

    #[test]
    fn display_range_of_last_partial_page() {
        let items: Vec<u8> = vec![0; 53];
        let page = expect_page(paginate(&items, 20, 3));
        assert_eq!(page.first_position(), 41);
        assert_eq!(page.last_position(), 53);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn window_lists_all_pages_when_few() {
        assert_eq!(page_window(2, 3), vec![Number(1), Number(2), Number(3)]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn window_near_start() {
        assert_eq!(
            page_window(1, 10),
            vec![Number(1), Number(2), Number(3), Number(4), Ellipsis, Number(10)]
        );
    }

    #[test]
    fn window_in_the_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![Number(1), Ellipsis, Number(4), Number(5), Number(6), Ellipsis, Number(10)]
        );
    }

    #[test]
    fn window_near_end() {
        assert_eq!(
            page_window(10, 10),
            vec![Number(1), Ellipsis, Number(7), Number(8), Number(9), Number(10)]
        );
    }
}
