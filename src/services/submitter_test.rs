#[cfg(test)]
mod submitter_tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::client::{BookingGateway, ClientError, MockBookingGateway};
    use crate::client_mock::{MOCK_BOOKING_ID, PRICE_PER_LANE, PRICE_PER_PERSON};
    use crate::models::booking::BookingForm;
    use crate::models::confirmation::{BookingPayload, BookingResponse, ConfirmationRecord};
    use crate::services::session::{SessionStore, CONFIRMATION_KEY};
    use crate::services::submitter::{
        BookingSubmitter, MockNavigate, SubmitError, SubmitState, CONFIRMATION_PATH,
    };
    use crate::services::validation::ValidationError;

    fn valid_form() -> BookingForm {
        let mut form = BookingForm::new();
        form.apply_field("when", "2025-12-25".to_string());
        form.apply_field("time", "18:00".to_string());
        form.apply_field("people", "4".to_string());
        form.apply_field("lanes", "1".to_string());
        for size in ["40", "41", "42", "43"] {
            let entry = form.add_shoe();
            form.update_size(&entry.id, size.to_string());
        }
        form
    }

    // What the reservation backend would answer for this payload.
    fn confirmed(payload: &BookingPayload) -> BookingResponse {
        let people: i64 = payload.people.parse().unwrap();
        let lanes: i64 = payload.lanes.parse().unwrap();
        BookingResponse {
            booking_details: ConfirmationRecord {
                when: payload.when.clone(),
                people,
                lanes,
                booking_id: MOCK_BOOKING_ID.to_string(),
                price: people * PRICE_PER_PERSON + lanes * PRICE_PER_LANE,
                shoes: payload.shoes.clone(),
            },
        }
    }

    #[tokio::test]
    async fn successful_submission_persists_then_navigates() {
        let mut gateway = MockBookingGateway::new();
        gateway
            .expect_book()
            .times(1)
            .returning(|payload| Ok(confirmed(payload)));

        let mut navigator = MockNavigate::new();
        navigator
            .expect_navigate()
            .withf(|path, record: &ConfirmationRecord| {
                path == CONFIRMATION_PATH && record.price == 580 && record.booking_id == MOCK_BOOKING_ID
            })
            .times(1)
            .return_const(());

        let sessions = Arc::new(SessionStore::new());
        let submitter = BookingSubmitter::new(
            Arc::new(gateway),
            Arc::clone(&sessions),
            Arc::new(navigator),
        );

        let details = submitter.submit(valid_form()).await.unwrap();

        assert_eq!(details.when, "2025-12-25T18:00");
        assert_eq!(details.people, 4);
        assert_eq!(details.lanes, 1);
        assert_eq!(details.price, 580);
        assert_eq!(details.shoes, vec!["40", "41", "42", "43"]);
        assert_eq!(submitter.state(), SubmitState::Succeeded);

        // The exact same record was persisted, in the JS wire shape.
        let stored = sessions.get(CONFIRMATION_KEY).unwrap();
        assert!(stored.contains("\"bookingId\""));
        let record: ConfirmationRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(record, details);
    }

    #[tokio::test]
    async fn a_new_booking_overwrites_the_previous_confirmation() {
        let mut gateway = MockBookingGateway::new();
        gateway
            .expect_book()
            .times(2)
            .returning(|payload| Ok(confirmed(payload)));
        let mut navigator = MockNavigate::new();
        navigator.expect_navigate().times(2).return_const(());

        let sessions = Arc::new(SessionStore::new());
        let submitter = BookingSubmitter::new(
            Arc::new(gateway),
            Arc::clone(&sessions),
            Arc::new(navigator),
        );

        submitter.submit(valid_form()).await.unwrap();

        let mut second = valid_form();
        second.apply_field("time", "20:00".to_string());
        submitter.submit(second).await.unwrap();

        let stored = sessions.get(CONFIRMATION_KEY).unwrap();
        let record: ConfirmationRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(record.when, "2025-12-25T20:00");
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_network() {
        // No expectations on either mock: any call would panic.
        let gateway = MockBookingGateway::new();
        let navigator = MockNavigate::new();
        let sessions = Arc::new(SessionStore::new());
        let submitter = BookingSubmitter::new(
            Arc::new(gateway),
            Arc::clone(&sessions),
            Arc::new(navigator),
        );

        let err = submitter.submit(BookingForm::new()).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingFields)
        ));
        assert_eq!(err.to_string(), "Alla fälten måste vara ifyllda");
        assert_eq!(submitter.state(), SubmitState::FailedValidation);
        assert!(sessions.get(CONFIRMATION_KEY).is_none());
    }

    #[tokio::test]
    async fn network_failure_leaves_no_trace_and_allows_resubmission() {
        let mut gateway = MockBookingGateway::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_book()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Unavailable("connection reset".to_string())));
        gateway
            .expect_book()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|payload| Ok(confirmed(payload)));

        let mut navigator = MockNavigate::new();
        navigator.expect_navigate().times(1).return_const(());

        let sessions = Arc::new(SessionStore::new());
        let submitter = BookingSubmitter::new(
            Arc::new(gateway),
            Arc::clone(&sessions),
            Arc::new(navigator),
        );

        let err = submitter.submit(valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
        assert_eq!(submitter.state(), SubmitState::FailedNetwork);
        assert!(sessions.get(CONFIRMATION_KEY).is_none());

        // The user resubmits; validation runs from scratch and the attempt
        // goes through.
        let details = submitter.submit(valid_form()).await.unwrap();
        assert_eq!(details.price, 580);
        assert_eq!(submitter.state(), SubmitState::Succeeded);
    }

    // Gateway that parks until released, to hold an attempt in `Submitting`.
    struct StallingGateway {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl BookingGateway for StallingGateway {
        async fn book(&self, payload: &BookingPayload) -> Result<BookingResponse, ClientError> {
            self.release.notified().await;
            Ok(confirmed(payload))
        }
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected_without_a_second_request() {
        let release = Arc::new(Notify::new());
        let gateway = Arc::new(StallingGateway {
            release: Arc::clone(&release),
        });

        let mut navigator = MockNavigate::new();
        navigator.expect_navigate().times(1).return_const(());

        let sessions = Arc::new(SessionStore::new());
        let submitter = Arc::new(BookingSubmitter::new(
            gateway,
            Arc::clone(&sessions),
            Arc::new(navigator),
        ));

        let background = Arc::clone(&submitter);
        let first = tokio::spawn(async move { background.submit(valid_form()).await });

        // Wait for the first attempt to reach the network call.
        while submitter.state() != SubmitState::Submitting {
            tokio::task::yield_now().await;
        }

        let err = submitter.submit(valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::AlreadyInFlight));

        release.notify_one();
        let details = first.await.unwrap().unwrap();
        assert_eq!(details.price, 580);
        assert_eq!(submitter.state(), SubmitState::Succeeded);
    }
}
