//! List continuation
//!
//! Paged list operations return a collection with an optional `next` link.
//! A [`Pager`] repeats the list call with the `start` token taken from that
//! link until the service stops returning one.
//!
//! ```no_run
//! # async fn example(service: vpcbeta::VpcService) -> vpcbeta::Result<()> {
//! use vpcbeta::ListSubnetsOptions;
//!
//! let mut pager = service.pager(ListSubnetsOptions {
//!     limit: Some(50),
//!     ..Default::default()
//! });
//! while pager.has_next() {
//!     for subnet in pager.get_next().await? {
//!         println!("{}", subnet.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::api::common::PageLink;
use crate::error::{Error, Result};
use crate::service::{DetailedResponse, VpcService};
use futures::future::BoxFuture;
use futures::stream::{unfold, Stream};

/// One page of a paged collection
pub trait Page {
    type Item;

    fn next_link(&self) -> Option<&PageLink>;

    /// The `start` token for the following page, if there is one
    fn next_start(&self) -> Option<String> {
        self.next_link().and_then(PageLink::start)
    }

    fn into_items(self) -> Vec<Self::Item>;
}

/// Options of a paged list operation
pub trait ListRequest: Clone + Send + Sync {
    type Page: Page + Send;

    fn set_start(&mut self, start: Option<String>);

    /// Issue the list call with the current options
    fn fetch<'a>(
        &'a self,
        service: &'a VpcService,
    ) -> BoxFuture<'a, Result<DetailedResponse<Self::Page>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// Nothing fetched yet; the caller's own `start` (if any) is used
    Initial,
    Next(String),
    Done,
}

/// Forward-only, single-pass iterator over the pages of a list operation
pub struct Pager<O: ListRequest> {
    service: VpcService,
    options: O,
    cursor: Cursor,
}

impl<O: ListRequest> Pager<O> {
    pub fn new(service: VpcService, options: O) -> Self {
        Self {
            service,
            options,
            cursor: Cursor::Initial,
        }
    }

    /// True until a page without a `next` link has been returned
    pub fn has_next(&self) -> bool {
        self.cursor != Cursor::Done
    }

    /// Fetch the next page
    ///
    /// On error the pager keeps its position, so the call can be repeated.
    pub async fn get_next(&mut self) -> Result<Vec<<O::Page as Page>::Item>> {
        match &self.cursor {
            Cursor::Done => return Err(Error::Exhausted),
            Cursor::Next(start) => self.options.set_start(Some(start.clone())),
            Cursor::Initial => {},
        }

        let response = self.options.fetch(&self.service).await?;
        let page = response.result;

        self.cursor = match (page.next_start(), page.next_link()) {
            (Some(start), _) => Cursor::Next(start),
            (None, Some(link)) => {
                tracing::warn!("Next link {} has no start token, ending the listing", link.href);
                Cursor::Done
            }
            (None, None) => Cursor::Done,
        };
        tracing::debug!("Fetched page, more available: {}", self.has_next());

        Ok(page.into_items())
    }

    /// Fetch every remaining page and concatenate the items
    pub async fn get_all(&mut self) -> Result<Vec<<O::Page as Page>::Item>> {
        let mut all_items = Vec::new();
        while self.has_next() {
            all_items.extend(self.get_next().await?);
        }
        Ok(all_items)
    }

    /// Convert into a stream of pages; the stream ends after the last page
    /// or the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<<O::Page as Page>::Item>>> {
        unfold(Some(self), |state| async move {
            let mut pager = state?;
            if !pager.has_next() {
                return None;
            }
            match pager.get_next().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl VpcService {
    /// Create a pager over a paged list operation
    pub fn pager<O: ListRequest>(&self, options: O) -> Pager<O> {
        Pager::new(self.clone(), options)
    }
}

/// Wire a list operation into the pager: `paged_list!(Options, Collection, items_field: Item, method)`
macro_rules! paged_list {
    ($options:ty, $collection:ty, $field:ident: $item:ty, $method:ident) => {
        impl $crate::pager::Page for $collection {
            type Item = $item;

            fn next_link(&self) -> Option<&$crate::api::common::PageLink> {
                self.next.as_ref()
            }

            fn into_items(self) -> Vec<$item> {
                self.$field
            }
        }

        impl $crate::pager::ListRequest for $options {
            type Page = $collection;

            fn set_start(&mut self, start: Option<String>) {
                self.start = start;
            }

            fn fetch<'a>(
                &'a self,
                service: &'a $crate::service::VpcService,
            ) -> futures::future::BoxFuture<
                'a,
                $crate::error::Result<$crate::service::DetailedResponse<$collection>>,
            > {
                Box::pin(service.$method(self))
            }
        }
    };
}

pub(crate) use paged_list;
