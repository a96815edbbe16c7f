use bson::Document;

use crate::errors::DbError;

type DocStream = Box<dyn Iterator<Item = Result<Document, DbError>> + Send>;

/// Forward-only, single-pass view over the documents a query matched.
///
/// The backing driver cursor is released when this value is dropped or
/// fully consumed, whichever comes first.
pub struct Cursor {
    inner: Option<DocStream>,
    yielded: u64,
}

impl Cursor {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<Document, DbError>> + Send + 'static,
    {
        Self { inner: Some(Box::new(iter)), yielded: 0 }
    }

    pub fn from_documents(docs: Vec<Document>) -> Self {
        Self::new(docs.into_iter().map(Ok))
    }

    pub fn advance(&mut self) -> Option<Result<Document, DbError>> {
        let next = self.inner.as_mut()?.next();
        match next {
            Some(Ok(d)) => {
                self.yielded += 1;
                Some(Ok(d))
            }
            Some(Err(e)) => Some(Err(e)),
            None => {
                self.inner = None;
                None
            }
        }
    }

    /// Number of documents handed out so far.
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.is_none()
    }

    /// # Errors
    /// Stops at the first error the driver reports while iterating.
    pub fn to_vec(self) -> Result<Vec<Document>, DbError> {
        self.collect()
    }
}

impl Iterator for Cursor {
    type Item = Result<Document, DbError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("yielded", &self.yielded)
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}
