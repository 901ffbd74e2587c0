//src/session.rs

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::types::{ClassificationRequest, ClassificationResponse};
use crate::validate::validate_response;

/// The external classification model. Returns one complete response per
/// request; there are no partial results and no cancellation.
pub trait ClassificationService {
    fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResponse>;
}

/// Identifies one classification run. Later runs get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

/// Holds the response currently on screen.
///
/// A run that finishes after a newer run has started is discarded, so a slow
/// first request can never overwrite the result of a second one.
#[derive(Debug, Default)]
pub struct ResultSession {
    latest_ticket: AtomicU64,
    current: RwLock<Option<(RunTicket, Arc<ClassificationResponse>)>>,
}

impl ResultSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run; the returned ticket supersedes every earlier one.
    pub fn begin_run(&self) -> RunTicket {
        RunTicket(self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install `response` if `ticket` is still the newest run.
    ///
    /// Returns `Ok(false)` when the response was stale and dropped. Responses
    /// that fail validation are rejected and the current one is kept.
    pub fn complete_run(&self, ticket: RunTicket, response: ClassificationResponse) -> Result<bool> {
        validate_response(&response)?;

        let mut current = self.current.write();
        if ticket.0 != self.latest_ticket.load(Ordering::SeqCst) {
            log::warn!(
                "Discarding response for superseded run {} (latest is {})",
                ticket.0,
                self.latest_ticket.load(Ordering::SeqCst)
            );
            return Ok(false);
        }
        log::info!(
            "Run {} complete: {} sequence(s) from {}",
            ticket.0,
            response.total_sequences,
            response.source
        );
        *current = Some((ticket, Arc::new(response)));
        Ok(true)
    }

    /// Run a classification request through `service` and keep the result if
    /// no newer run started meanwhile.
    pub fn run<S: ClassificationService + ?Sized>(
        &self,
        service: &S,
        request: &ClassificationRequest,
    ) -> Result<Option<Arc<ClassificationResponse>>> {
        let ticket = self.begin_run();
        let response = service.classify(request)?;
        if self.complete_run(ticket, response)? {
            Ok(self.current())
        } else {
            Ok(None)
        }
    }

    /// Snapshot of the response on screen, if any.
    pub fn current(&self) -> Option<Arc<ClassificationResponse>> {
        self.current.read().as_ref().map(|(_, response)| Arc::clone(response))
    }

    /// Forget the current response (e.g. on reload).
    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::test_support::{mock_response, response_with_counts};

    struct FixedService(ClassificationResponse);

    impl ClassificationService for FixedService {
        fn classify(&self, _request: &ClassificationRequest) -> Result<ClassificationResponse> {
            Ok(self.0.clone())
        }
    }

    struct DownService;

    impl ClassificationService for DownService {
        fn classify(&self, _request: &ClassificationRequest) -> Result<ClassificationResponse> {
            Err(ReportError::Service("connection refused".to_string()))
        }
    }

    fn request() -> ClassificationRequest {
        ClassificationRequest::from_fasta(">s1\nACGT\n", None, "frontend_upload").unwrap()
    }

    #[test]
    fn test_late_response_is_discarded() {
        let session = ResultSession::new();
        let first = session.begin_run();
        let second = session.begin_run();
        assert!(second > first);

        let newer = response_with_counts(0, 4, 0);
        assert!(session.complete_run(second, newer.clone()).unwrap());
        assert!(!session.complete_run(first, mock_response()).unwrap());
        assert_eq!(*session.current().unwrap(), newer);
    }

    #[test]
    fn test_run_through_service() {
        let session = ResultSession::new();
        let shown = session.run(&FixedService(mock_response()), &request()).unwrap();
        assert_eq!(shown.unwrap().total_sequences, 3);
    }

    #[test]
    fn test_failures_keep_current_response() {
        let session = ResultSession::new();
        session.run(&FixedService(mock_response()), &request()).unwrap();

        assert!(matches!(
            session.run(&DownService, &request()),
            Err(ReportError::Service(_))
        ));

        let mut broken = mock_response();
        broken.virus_count = 3;
        let ticket = session.begin_run();
        assert!(session.complete_run(ticket, broken).is_err());

        assert_eq!(*session.current().unwrap(), mock_response());
        session.clear();
        assert!(session.current().is_none());
    }
}
