use std::collections::BTreeSet;

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Which page links to show around the current page.
#[derive(Clone, Copy, Debug)]
struct PageWindow {
    /// Pages always shown at each end.
    edge: usize,
    before: usize,
    after: usize,
}

impl PageWindow {
    const DEFAULT: PageWindow = PageWindow {
        edge: 2,
        before: 2,
        after: 4,
    };

    /// Page numbers to render, with `None` standing for an elided gap.
    ///
    /// A gap of a single page is filled with that page instead of `None`.
    fn pages(self, total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
        let shown: BTreeSet<usize> = (1..=self.edge)
            .chain(current_page.saturating_sub(self.before)..=current_page + self.after)
            .chain(total_pages.saturating_sub(self.edge) + 1..=total_pages)
            .filter(|page| (1..=total_pages).contains(page))
            .collect();

        let mut pages = Vec::with_capacity(shown.len() + 2);
        let mut previous = 0;
        for page in shown {
            match page - previous {
                1 => {}
                2 => pages.push(Some(page - 1)),
                _ => pages.push(None),
            }
            pages.push(Some(page));
            previous = page;
        }
        pages
    }
}

/// One page of an in-memory list together with its page navigation.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = current_page.max(1);
        let pages = PageWindow::DEFAULT.pages(total_pages, current_page);

        Self {
            items,
            pages,
            page: current_page,
        }
    }

    /// Cuts page `page` out of an already filtered list.
    ///
    /// Pages are 1-based; 0 is treated as 1 and pages past the end as the last page.
    pub fn slice(all: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = all.len().div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));
        let items = all
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();
        Self::new(items, page, total_pages)
    }
}
