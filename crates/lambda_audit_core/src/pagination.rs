//! Cursor-driven pagination over listing calls.
//!
//! Every IAM and Lambda listing call has the same shape: send an optional
//! cursor, receive a batch of items plus an optional cursor for the next
//! batch. [`paginate`] turns that shape into a lazy iterator so callers
//! never hand-roll the loop.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Identity extractor for fetchers that already return a `Page`.
    pub fn into_page(self) -> Self {
        self
    }
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

pub struct Paginated<R, T, E, F, X> {
    fetch: F,
    extract: X,
    cursor: Cursor,
    buffered: VecDeque<T>,
    _response: std::marker::PhantomData<fn() -> Result<R, E>>,
}

/// Lazily walks a listing call until it stops returning a continuation token.
///
/// `fetch` receives `None` for the first page and the previous token after
/// that; `extract` maps the raw response to a [`Page`]. Item order is the
/// order the pages return them.
pub fn paginate<R, T, E, F, X>(fetch: F, extract: X) -> Paginated<R, T, E, F, X>
where
    F: FnMut(Option<&str>) -> Result<R, E>,
    X: FnMut(R) -> Page<T>,
{
    Paginated {
        fetch,
        extract,
        cursor: Cursor::Start,
        buffered: VecDeque::new(),
        _response: std::marker::PhantomData,
    }
}

/// Drains [`paginate`] into a `Vec`, stopping at the first error.
pub fn collect_all<R, T, E, F, X>(fetch: F, extract: X) -> Result<Vec<T>, E>
where
    F: FnMut(Option<&str>) -> Result<R, E>,
    X: FnMut(R) -> Page<T>,
{
    paginate(fetch, extract).collect()
}

impl<R, T, E, F, X> Paginated<R, T, E, F, X>
where
    F: FnMut(Option<&str>) -> Result<R, E>,
    X: FnMut(R) -> Page<T>,
{
    fn fetch_next(&mut self) -> Result<(), E> {
        let sent = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return Ok(()),
        };

        let response = (self.fetch)(sent.as_deref())?;
        let page = (self.extract)(response);
        self.buffered.extend(page.items);

        self.cursor = match page.next_token {
            Some(token) if token.is_empty() => Cursor::Done,
            Some(token) if sent.as_deref() == Some(token.as_str()) => Cursor::Done,
            Some(token) => Cursor::Next(token),
            None => Cursor::Done,
        };
        Ok(())
    }
}

impl<R, T, E, F, X> Iterator for Paginated<R, T, E, F, X>
where
    F: FnMut(Option<&str>) -> Result<R, E>,
    X: FnMut(R) -> Page<T>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Some(Ok(item));
            }
            if matches!(self.cursor, Cursor::Done) {
                return None;
            }
            // Cursor is already Done if the fetch fails, so the error is yielded once.
            if let Err(error) = self.fetch_next() {
                return Some(Err(error));
            }
        }
    }
}
