//! Unit tests for the acquisition crate
//!
//! Scenarios run a whole [`crate::SessionContext`] against the in-memory
//! gateway.

#[cfg(test)]
mod property_tests {
    use gateway::dto::UploadResponse;
    use gateway::testing::suggestion;
    use platform::secret::SecretToken;
    use session::Credential;

    use crate::domain::entities::{CandidateDraft, CardImage};
    use crate::domain::value_objects::{DraftPatch, Finish, ImageSide};
    use crate::{AcquisitionError, AcquisitionWorkflow, WorkflowState};

    fn credential() -> Credential {
        Credential::new(SecretToken::new("token-1"), "ash@example.com")
    }

    fn image(name: &str) -> CardImage {
        CardImage::new(name, vec![1, 2, 3, 4]).unwrap()
    }

    fn reviewing(response: UploadResponse) -> AcquisitionWorkflow {
        let mut workflow = AcquisitionWorkflow::new();
        workflow.select_image(ImageSide::Front, image("front.jpg")).unwrap();
        workflow.select_image(ImageSide::Back, image("back.jpg")).unwrap();
        let pending = workflow.begin_submit(Some(&credential())).unwrap();
        workflow.complete_submit(pending.id, Ok(response)).unwrap();
        workflow
    }

    fn three_candidates() -> UploadResponse {
        UploadResponse {
            suggestions: vec![
                suggestion("Pikachu", "Base Set", "58", Some("Common"), Some(2.5)),
                suggestion("Pikachu", "Jungle", "60", None, None),
                suggestion("Pikachu", "Promo", "1", Some("Promo"), Some(12.0)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_needs_both_images_and_credential() {
        let selections: [&[ImageSide]; 5] = [
            &[],
            &[ImageSide::Front],
            &[ImageSide::Back],
            &[ImageSide::Back, ImageSide::Back],
            &[ImageSide::Front, ImageSide::Back],
        ];

        for selection in selections {
            for with_credential in [false, true] {
                let mut workflow = AcquisitionWorkflow::new();
                for side in selection {
                    workflow.select_image(*side, image("card.png")).unwrap();
                }
                let before = workflow.state();
                let credential = credential();
                let result = workflow.begin_submit(with_credential.then_some(&credential));

                let complete = selection.contains(&ImageSide::Front)
                    && selection.contains(&ImageSide::Back);
                if complete && with_credential {
                    assert!(result.is_ok());
                    assert_eq!(workflow.state(), WorkflowState::Submitting);
                } else {
                    let err = result.unwrap_err();
                    if with_credential {
                        assert!(matches!(err, AcquisitionError::IncompleteInput { .. }));
                    } else {
                        assert!(matches!(err, AcquisitionError::Unauthenticated));
                    }
                    assert_eq!(workflow.state(), before);
                }
            }
        }
    }

    #[test]
    fn test_choose_reproduces_candidate() {
        let mut workflow = reviewing(three_candidates());
        let candidates = workflow.candidates().to_vec();
        assert_eq!(candidates.len(), 3);

        for (i, candidate) in candidates.iter().enumerate() {
            let draft = workflow.choose_candidate(i).unwrap().clone();
            assert_eq!(draft.name, candidate.name);
            assert_eq!(draft.set_name, candidate.set_name);
            assert_eq!(draft.number, candidate.number);
            assert_eq!(draft.rarity, candidate.rarity.clone().unwrap_or_default());
            assert_eq!(draft.image_url, candidate.image_url.clone().unwrap_or_default());
            assert_eq!(draft.price, candidate.average_sell_price.unwrap_or(0.0));
            assert_eq!(draft.finish, Finish::Normal);
        }
    }

    #[test]
    fn test_candidate_order_preserved() {
        let workflow = reviewing(three_candidates());
        let sets: Vec<&str> = workflow
            .candidates()
            .iter()
            .map(|c| c.set_name.as_str())
            .collect();
        assert_eq!(sets, ["Base Set", "Jungle", "Promo"]);
    }

    #[test]
    fn test_finish_stays_in_closed_set() {
        let mut workflow = reviewing(three_candidates());
        workflow.choose_candidate(0).unwrap();
        workflow.set_field("finish", "Holo").unwrap();

        for bad in ["Gold", "holographic", "", "Normal Holo"] {
            assert!(workflow.set_field("finish", bad).is_err());
            assert_eq!(workflow.draft().unwrap().finish, Finish::Holo);
        }
    }

    #[test]
    fn test_rejected_price_keeps_prior_value() {
        let mut workflow = reviewing(three_candidates());
        workflow.choose_candidate(0).unwrap();

        assert!(matches!(
            workflow.set_field("price", "cheap"),
            Err(AcquisitionError::InvalidPrice { .. })
        ));
        assert_eq!(workflow.draft().unwrap().price, 2.5);

        assert!(workflow.edit_field(DraftPatch::Price(f64::INFINITY)).is_err());
        assert_eq!(workflow.draft().unwrap().price, 2.5);

        assert!(matches!(
            workflow.set_field("owner", "Ash"),
            Err(AcquisitionError::UnknownField { .. })
        ));
        assert_eq!(workflow.state(), WorkflowState::Editing);
    }

    #[test]
    fn test_empty_candidates_is_reviewing() {
        let mut workflow = reviewing(UploadResponse::default());
        assert_eq!(workflow.state(), WorkflowState::Reviewing);
        assert!(workflow.candidates().is_empty());
        assert!(workflow.recognition().unwrap().is_empty());
        assert!(matches!(
            workflow.choose_candidate(0),
            Err(AcquisitionError::CandidateOutOfRange { index: 0, len: 0 })
        ));

        // Manual entry is still possible
        let draft = workflow.enter_manually().unwrap();
        assert_eq!(draft, &CandidateDraft::manual());
    }

    #[test]
    fn test_confirmed_requires_new_choice() {
        let mut workflow = reviewing(three_candidates());
        workflow.choose_candidate(0).unwrap();
        let pending = workflow.begin_confirm(Some(&credential())).unwrap();
        workflow
            .complete_confirm(
                pending.id,
                Ok(gateway::dto::MessageResponse {
                    message: "Carte ajoutée".into(),
                }),
            )
            .unwrap();

        assert_eq!(workflow.state(), WorkflowState::Confirmed);
        assert!(workflow.draft().is_none());
        assert!(matches!(
            workflow.begin_confirm(Some(&credential())),
            Err(AcquisitionError::NoDraft)
        ));

        workflow.choose_candidate(2).unwrap();
        assert!(workflow.begin_confirm(Some(&credential())).is_ok());
    }
}

#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;

    use gateway::dto::{CollectionFilter, UploadResponse};
    use gateway::testing::{FakeGateway, Operation, suggestion};
    use gateway::AppError;
    use platform::secret::ClearTextPassword;

    use crate::domain::entities::{CandidateDraft, CardImage};
    use crate::domain::value_objects::{Finish, ImageSide};
    use crate::{AcquisitionError, ErrorKind, SessionContext, WorkflowState};

    fn context() -> (Arc<FakeGateway>, SessionContext<FakeGateway>) {
        let gateway = Arc::new(FakeGateway::new().with_account("ash@example.com", "pikachu"));
        (gateway.clone(), SessionContext::new(gateway))
    }

    async fn logged_in() -> (Arc<FakeGateway>, SessionContext<FakeGateway>) {
        let (gateway, mut context) = context();
        context
            .login("ash@example.com", ClearTextPassword::new("pikachu"))
            .await
            .unwrap();
        (gateway, context)
    }

    fn select_both(context: &mut SessionContext<FakeGateway>) {
        let workflow = context.workflow_mut();
        workflow
            .select_image(ImageSide::Front, CardImage::new("front.jpg", vec![0xFF; 16]).unwrap())
            .unwrap();
        workflow
            .select_image(ImageSide::Back, CardImage::new("back.jpg", vec![0xEE; 8]).unwrap())
            .unwrap();
    }

    fn pikachu() -> UploadResponse {
        UploadResponse {
            recto_text: "Pikachu 58/102".into(),
            language: Some("en".into()),
            pokemon_name: Some("Pikachu".into()),
            card_number: Some("58/102".into()),
            status: Some("pending_confirmation".into()),
            suggestions: vec![suggestion("Pikachu", "Base Set", "58", Some("Common"), Some(2.5))],
        }
    }

    #[tokio::test]
    async fn test_pikachu_end_to_end() {
        let (gateway, mut context) = logged_in().await;
        assert_eq!(context.credential().unwrap().token().expose(), "token-1");

        select_both(&mut context);
        let mut response = pikachu();
        response.suggestions[0].image = None;
        gateway.script_upload(Ok(response));

        let recognition = context.submit().await.unwrap();
        assert_eq!(recognition.candidates.len(), 1);
        assert_eq!(recognition.summary.pokemon_name.as_deref(), Some("Pikachu"));

        let upload = gateway.last_upload().unwrap();
        assert_eq!(upload.recto.file_name, "front.jpg");
        assert_eq!(upload.verso.bytes.len(), 8);

        let draft = context.workflow_mut().choose_candidate(0).unwrap().clone();
        assert_eq!(
            draft,
            CandidateDraft {
                name: "Pikachu".into(),
                set_name: "Base Set".into(),
                number: "58".into(),
                rarity: "Common".into(),
                price: 2.5,
                image_url: String::new(),
                finish: Finish::Normal,
            }
        );

        let message = context.confirm().await.unwrap().to_string();
        assert_eq!(message, "Carte ajoutée à la collection");
        assert_eq!(context.workflow().state(), WorkflowState::Confirmed);
        assert!(context.workflow().draft().is_none());

        let confirmed = gateway.confirmed();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].name.as_deref(), Some("Pikachu"));
        assert_eq!(confirmed[0].price, Some(2.5));
        assert_eq!(confirmed[0].finish.as_deref(), Some("Normal"));
    }

    #[tokio::test]
    async fn test_missing_image_sends_nothing() {
        let (gateway, mut context) = logged_in().await;
        context
            .workflow_mut()
            .select_image(ImageSide::Front, CardImage::new("front.jpg", vec![1]).unwrap())
            .unwrap();

        let err = context.submit().await.unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::IncompleteInput {
                missing: ImageSide::Back
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(context.workflow().state(), WorkflowState::AwaitingImages);
        assert_eq!(gateway.calls(Operation::SubmitImages), 0);
    }

    #[tokio::test]
    async fn test_submit_without_login_sends_nothing() {
        let (gateway, mut context) = context();
        select_both(&mut context);

        let err = context.submit().await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Unauthenticated));
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
        assert_eq!(gateway.calls(Operation::SubmitImages), 0);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_images() {
        let (gateway, mut context) = logged_in().await;
        select_both(&mut context);
        gateway.script_upload(Err(AppError::server("OCR backend down")));

        let err = context.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(context.workflow().state(), WorkflowState::AwaitingImages);
        assert!(context.workflow().images().is_complete());
        assert!(context.credential().is_some());

        // Manual retry
        gateway.script_upload(Ok(pikachu()));
        context.submit().await.unwrap();
        assert_eq!(context.workflow().state(), WorkflowState::Reviewing);
        assert_eq!(gateway.calls(Operation::SubmitImages), 2);
    }

    #[tokio::test]
    async fn test_confirm_failure_keeps_draft_and_calls_once() {
        let (gateway, mut context) = logged_in().await;
        select_both(&mut context);
        gateway.script_upload(Ok(pikachu()));
        context.submit().await.unwrap();

        let workflow = context.workflow_mut();
        workflow.choose_candidate(0).unwrap();
        workflow.set_field("finish", "reverse").unwrap();
        workflow.set_field("price", "3.75").unwrap();
        let before = workflow.draft().cloned();

        gateway.script_confirm(Err(AppError::server("database locked")));
        let err = context.confirm().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(context.workflow().state(), WorkflowState::Editing);
        assert_eq!(context.workflow().draft().cloned(), before);
        assert_eq!(gateway.calls(Operation::ConfirmDraft), 1);
        assert!(gateway.confirmed().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_clears_credential() {
        let (gateway, mut context) = logged_in().await;
        select_both(&mut context);
        gateway.revoke_tokens();

        let err = context.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(context.credential().is_none());
        assert_eq!(context.workflow().state(), WorkflowState::AwaitingImages);

        let err = context.submit().await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Unauthenticated));
        assert_eq!(gateway.calls(Operation::SubmitImages), 1);
    }

    #[tokio::test]
    async fn test_validation_error_keeps_credential() {
        let (gateway, mut context) = logged_in().await;
        select_both(&mut context);
        gateway.script_upload(Err(AppError::validation("Field required")));

        let err = context.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_remote());
        assert!(context.credential().is_some());
    }

    #[tokio::test]
    async fn test_collection_queries() {
        let (gateway, mut context) = logged_in().await;

        for (name, price) in [("Pikachu", 2.5), ("Charizard", 300.0)] {
            select_both(&mut context);
            gateway.script_upload(Ok(UploadResponse {
                suggestions: vec![suggestion(name, "Base Set", "4", Some("Rare Holo"), Some(price))],
                ..Default::default()
            }));
            context.submit().await.unwrap();
            context.workflow_mut().choose_candidate(0).unwrap();
            context.confirm().await.unwrap();
            context.workflow_mut().reset().unwrap();
        }

        let entries = context
            .collection(&CollectionFilter {
                min_price: Some(100.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Charizard");

        assert_eq!(context.collection_value().await.unwrap(), 302.5);

        let stats = context.collection_stats().await.unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.most_expensive.unwrap().name, "Charizard");
        assert_eq!(stats.top.len(), 2);
    }

    #[tokio::test]
    async fn test_collection_requires_login() {
        let (gateway, mut context) = context();
        let err = context.collection_value().await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Unauthenticated));
        assert_eq!(gateway.calls(Operation::CollectionValue), 0);

        let (gateway, mut context) = logged_in().await;
        gateway.revoke_tokens();
        let err = context.collection_stats().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(context.credential().is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_account("ash@example.com", "pikachu")
                .with_account("misty@example.com", "starmie"),
        );
        let mut ash = SessionContext::new(gateway.clone());
        let mut misty = SessionContext::new(gateway.clone());
        assert_ne!(ash.id(), misty.id());

        ash.login("ash@example.com", ClearTextPassword::new("pikachu"))
            .await
            .unwrap();
        select_both(&mut ash);
        gateway.script_upload(Ok(pikachu()));
        ash.submit().await.unwrap();

        assert!(misty.credential().is_none());
        assert_eq!(misty.workflow().state(), WorkflowState::Idle);
        misty
            .login("misty@example.com", ClearTextPassword::new("starmie"))
            .await
            .unwrap();
        assert_eq!(ash.workflow().candidates().len(), 1);
        assert!(misty.workflow().candidates().is_empty());
    }
}
