//! Checkout service
//!
//! Orchestrates the session state machine: applies draft updates, runs the
//! section validators at each checkpoint, and hands payment to the gateway.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{ChargeRequest, PaymentGateway, PaymentOutcome};
use crate::application::validation::{validate_all, validate_sections, CheckoutRules, ValidationContext};
use crate::domain::booking::DraftUpdate;
use crate::domain::checkout::{CheckoutSession, Layout, PendingCharge, Section, SessionRepository, Step};
use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::time::SharedClock;

const GATEWAY_FAILURE: &str = "Payment could not be processed, please try again";

/// Behaviour switches for new sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutSettings {
    pub layout: Layout,
    pub rules: CheckoutRules,
}

pub struct CheckoutService {
    sessions: Arc<dyn SessionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    clock: SharedClock,
    settings: CheckoutSettings,
}

impl CheckoutService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        gateway: Arc<dyn PaymentGateway>,
        clock: SharedClock,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            sessions,
            gateway,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> CheckoutSettings {
        self.settings
    }

    /// Validation context for "now". The minimum date moves with the clock.
    pub fn context(&self) -> ValidationContext {
        ValidationContext::new(self.clock.today(), self.settings.rules)
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.count().await
    }

    pub async fn create(&self, layout: Option<Layout>) -> DomainResult<CheckoutSession> {
        let layout = layout.unwrap_or(self.settings.layout);
        let session = CheckoutSession::new(layout, self.clock.now());
        self.sessions.save(session.clone()).await?;

        metrics::counter!("checkout_sessions_created_total", "layout" => layout.as_str()).increment(1);
        info!(session_id = %session.id, layout = %layout, "Checkout session created");
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<CheckoutSession> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::session_not_found(id))
    }

    /// Apply a batch of updates atomically, then refresh the stored errors.
    pub async fn apply_updates(&self, id: Uuid, updates: Vec<DraftUpdate>) -> DomainResult<CheckoutSession> {
        let ctx = self.context();
        let now = self.clock.now();

        let session = self
            .sessions
            .modify(id, &mut |session: &mut CheckoutSession| {
                let mut working = session.clone();
                let mut effects = Vec::with_capacity(updates.len());
                for update in &updates {
                    effects.push(working.apply(update.clone(), ctx.rules.max_interests, now)?);
                }
                let current = validate_all(working.draft()?, &ctx);
                working.reconcile_errors(&effects, &current);
                *session = working;
                Ok(())
            })
            .await?;

        debug!(
            session_id = %id,
            updates = updates.len(),
            errors = session.errors.len(),
            "Draft updated"
        );
        Ok(session)
    }

    /// Validate the current step and move forward.
    pub async fn next(&self, id: Uuid) -> DomainResult<CheckoutSession> {
        let ctx = self.context();
        let now = self.clock.now();
        let mut from: Option<Step> = None;

        let result = self
            .sessions
            .modify(id, &mut |session: &mut CheckoutSession| {
                session.ensure_editable()?;
                from = Some(session.step);
                let errors = validate_sections(session.step.sections(), session.draft()?, &ctx);
                session.advance(errors, now).map(|_| ())
            })
            .await;

        let from = from.map(|s| s.as_str()).unwrap_or("unknown");
        match &result {
            Ok(session) => {
                metrics::counter!(
                    "checkout_step_transitions_total",
                    "from" => from,
                    "to" => session.step.as_str()
                )
                .increment(1);
                info!(session_id = %id, from, to = %session.step, "Checkout step advanced");
            }
            Err(DomainError::Validation(errors)) => {
                metrics::counter!("checkout_validation_failures_total", "step" => from).increment(1);
                info!(
                    session_id = %id,
                    step = from,
                    errors = errors.len(),
                    focus = ?errors.focus().map(|f| f.key()),
                    "Checkout step blocked by validation"
                );
            }
            Err(_) => {}
        }
        result
    }

    /// Step back without validating.
    pub async fn back(&self, id: Uuid) -> DomainResult<CheckoutSession> {
        let now = self.clock.now();
        let session = self
            .sessions
            .modify(id, &mut |session: &mut CheckoutSession| session.back(now).map(|_| ()))
            .await?;
        debug!(session_id = %id, step = %session.step, "Checkout step back");
        Ok(session)
    }

    /// Validate card details, enter `Processing`, and settle in the background.
    ///
    /// Returns the session as it is while the charge is outstanding.
    pub async fn submit_payment(&self, id: Uuid) -> DomainResult<CheckoutSession> {
        let ctx = self.context();
        let now = self.clock.now();
        let mut pending: Option<PendingCharge> = None;

        let result = self
            .sessions
            .modify(id, &mut |session: &mut CheckoutSession| {
                session.ensure_editable()?;
                // The survey may have gone stale, e.g. the date slipped under the minimum.
                let mut errors = validate_sections(&Section::SURVEY, session.draft()?, &ctx);
                errors.merge(validate_sections(&[Section::Payment], session.draft()?, &ctx));
                pending = Some(session.begin_payment(errors, now)?);
                Ok(())
            })
            .await;

        if let Err(DomainError::Validation(errors)) = &result {
            metrics::counter!("checkout_validation_failures_total", "step" => Step::Payment.as_str())
                .increment(1);
            info!(session_id = %id, errors = errors.len(), "Payment blocked by validation");
        }
        let session = result?;

        if let Some(charge) = pending {
            info!(session_id = %id, amount = charge.amount, "Payment submitted");
            self.spawn_settlement(charge);
        }
        Ok(session)
    }

    fn spawn_settlement(&self, charge: PendingCharge) {
        let sessions = self.sessions.clone();
        let gateway = self.gateway.clone();
        let clock = self.clock.clone();
        tokio::spawn(async move {
            settle(sessions, gateway, clock, charge).await;
        });
    }

    /// Drop a session and everything entered into it.
    pub async fn discard(&self, id: Uuid) -> DomainResult<()> {
        if self.sessions.delete(id).await? {
            info!(session_id = %id, "Checkout session discarded");
            Ok(())
        } else {
            Err(DomainError::session_not_found(id))
        }
    }
}

async fn settle(
    sessions: Arc<dyn SessionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    clock: SharedClock,
    charge: PendingCharge,
) {
    let id = charge.session_id;
    let request = ChargeRequest {
        session_id: id,
        amount: charge.amount,
        cardholder: charge.cardholder,
        card_last4: charge.card_last4,
    };

    let settled = gateway
        .charge(request)
        .await
        .and_then(PaymentOutcome::into_reference);
    let outcome = match &settled {
        Ok(_) => "approved",
        Err(DomainError::PaymentDeclined(_)) => "declined",
        Err(_) => "error",
    };
    metrics::counter!("checkout_payments_total", "outcome" => outcome).increment(1);

    let now = clock.now();
    let result = sessions
        .modify(id, &mut |session: &mut CheckoutSession| match &settled {
            Ok(reference) => session.confirm(reference.clone(), now).map(|_| ()),
            Err(DomainError::PaymentDeclined(reason)) => session.decline(reason, now),
            Err(_) => session.decline(GATEWAY_FAILURE, now),
        })
        .await;

    match (result, &settled) {
        (Ok(_), Ok(reference)) => {
            info!(session_id = %id, reference = %reference, "Booking confirmed");
        }
        (Ok(_), Err(e)) => {
            warn!(session_id = %id, error = %e, "Payment not completed");
        }
        (Err(e), _) => {
            warn!(session_id = %id, error = %e, "Could not record payment outcome");
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::booking::{
        Area, BudgetTier, Country, Field, FoodDrinkOption, Interest, TimeSlot,
    };
    use crate::domain::checkout::Phase;
    use crate::infrastructure::payment::SimulatedPaymentGateway;
    use crate::infrastructure::storage::InMemorySessionRepository;
    use crate::shared::time::FixedClock;

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn charge(&self, _request: ChargeRequest) -> DomainResult<PaymentOutcome> {
            Ok(PaymentOutcome::Declined {
                reason: "Card was declined".to_string(),
            })
        }
    }

    struct UnreachableGateway;

    #[async_trait]
    impl PaymentGateway for UnreachableGateway {
        async fn charge(&self, _request: ChargeRequest) -> DomainResult<PaymentOutcome> {
            Err(DomainError::Conflict("gateway offline".to_string()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn service_with(gateway: Arc<dyn PaymentGateway>, layout: Layout) -> CheckoutService {
        CheckoutService::new(
            Arc::new(InMemorySessionRepository::new()),
            gateway,
            Arc::new(FixedClock(today())),
            CheckoutSettings {
                layout,
                rules: CheckoutRules::default(),
            },
        )
    }

    fn service(layout: Layout) -> CheckoutService {
        service_with(
            Arc::new(SimulatedPaymentGateway::new(Duration::from_millis(2000))),
            layout,
        )
    }

    fn survey_updates() -> Vec<DraftUpdate> {
        vec![
            DraftUpdate::FirstName("Ada".into()),
            DraftUpdate::LastName("Lovelace".into()),
            DraftUpdate::PhoneCountry(Country::Us),
            DraftUpdate::PhoneNumber("2065550100".into()),
            DraftUpdate::PreferredArea(Area::Fremont),
            DraftUpdate::GroupSize(Some(4)),
            DraftUpdate::Date(NaiveDate::from_ymd_opt(2026, 10, 20)),
            DraftUpdate::StartTime(TimeSlot::FivePm),
            DraftUpdate::EndTime(TimeSlot::ElevenPm),
            DraftUpdate::Budget(BudgetTier::Standard),
            DraftUpdate::FoodDrink {
                option: FoodDrinkOption::Dinner,
                selected: true,
            },
            DraftUpdate::Interest {
                interest: Interest::Nightlife,
                selected: true,
            },
            DraftUpdate::EssentialComms(true),
        ]
    }

    fn card_updates() -> Vec<DraftUpdate> {
        vec![
            DraftUpdate::CardNumber("4242424242424242".into()),
            DraftUpdate::CardName("Ada Lovelace".into()),
            DraftUpdate::Expiry("1228".into()),
            DraftUpdate::Cvc("123".into()),
        ]
    }

    async fn at_payment(svc: &CheckoutService) -> Uuid {
        let id = svc.create(None).await.unwrap().id;
        svc.apply_updates(id, survey_updates()).await.unwrap();
        while svc.get(id).await.unwrap().step != Step::Payment {
            svc.next(id).await.unwrap();
        }
        svc.apply_updates(id, card_updates()).await.unwrap();
        id
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_confirms_and_discards_draft() {
        let svc = service(Layout::SinglePage);
        let id = at_payment(&svc).await;

        let session = svc.submit_payment(id).await.unwrap();
        assert_eq!(session.phase, Phase::Processing);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        let session = svc.get(id).await.unwrap();
        assert_eq!(session.phase, Phase::Confirmed);
        assert_eq!(session.step, Step::Confirmed);
        assert!(session.draft.is_none());
        let confirmation = session.confirmation.unwrap();
        assert_eq!(confirmation.total, 600);
        assert!(!confirmation.reference.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn wizard_walks_every_step() {
        let svc = service(Layout::Wizard);
        let id = at_payment(&svc).await;
        svc.submit_payment(id).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(svc.get(id).await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn missing_group_size_blocks_with_focus() {
        let svc = service(Layout::SinglePage);
        let id = svc.create(None).await.unwrap().id;
        let updates = survey_updates()
            .into_iter()
            .filter(|u| !matches!(u, DraftUpdate::GroupSize(_)))
            .collect();
        svc.apply_updates(id, updates).await.unwrap();

        let err = svc.next(id).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.focus(), Some(Field::GroupSize));

        let session = svc.get(id).await.unwrap();
        assert_eq!(session.step, Step::Survey);
        assert_eq!(session.errors.focus(), Some(Field::GroupSize));
    }

    #[tokio::test]
    async fn fixing_a_field_clears_its_error() {
        let svc = service(Layout::Wizard);
        let id = svc.create(None).await.unwrap().id;
        svc.next(id).await.unwrap_err();
        assert!(svc.get(id).await.unwrap().errors.contains(Field::FirstName));

        let session = svc
            .apply_updates(id, vec![DraftUpdate::FirstName("Ada".into())])
            .await
            .unwrap();
        assert!(!session.errors.contains(Field::FirstName));
        assert!(session.errors.contains(Field::LastName));
    }

    #[tokio::test]
    async fn refused_amount_error_survives_other_edits() {
        let svc = service(Layout::SinglePage);
        let id = svc.create(None).await.unwrap().id;
        let dinner = Field::FoodDrinkAmount(FoodDrinkOption::Dinner);
        let amount = |amount: &str| DraftUpdate::FoodDrinkAmount {
            option: FoodDrinkOption::Dinner,
            amount: amount.into(),
        };
        svc.apply_updates(
            id,
            vec![
                DraftUpdate::FoodDrink {
                    option: FoodDrinkOption::Dinner,
                    selected: true,
                },
                amount("50"),
            ],
        )
        .await
        .unwrap();

        let session = svc.apply_updates(id, vec![amount("12.5")]).await.unwrap();
        assert_eq!(session.errors.get(dinner), Some("Whole number required"));

        let session = svc
            .apply_updates(id, vec![DraftUpdate::FirstName("Ada".into())])
            .await
            .unwrap();
        assert_eq!(session.errors.get(dinner), Some("Whole number required"));

        let session = svc.apply_updates(id, vec![amount("60")]).await.unwrap();
        assert!(!session.errors.contains(dinner));
    }

    #[tokio::test]
    async fn single_page_focus_follows_page_order() {
        let svc = service(Layout::SinglePage);
        let id = svc.create(None).await.unwrap().id;
        let err = svc.next(id).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains(Field::FirstName));
        assert_eq!(errors.focus(), Some(Field::GroupSize));
    }

    #[tokio::test]
    async fn failed_batch_leaves_session_untouched() {
        let svc = service(Layout::Wizard);
        let id = svc.create(None).await.unwrap().id;
        let err = svc
            .apply_updates(
                id,
                vec![
                    DraftUpdate::FirstName("Ada".into()),
                    DraftUpdate::CardName("Ada".into()),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert!(svc.get(id).await.unwrap().draft.unwrap().first_name.is_empty());
    }

    #[tokio::test]
    async fn interest_cap_error_is_stored() {
        let svc = service(Layout::Wizard);
        let id = svc.create(None).await.unwrap().id;
        let updates = Interest::ALL[..5]
            .iter()
            .map(|i| DraftUpdate::Interest {
                interest: *i,
                selected: true,
            })
            .collect();
        let session = svc.apply_updates(id, updates).await.unwrap();
        assert_eq!(session.draft.unwrap().interests.len(), 4);
        assert_eq!(
            session.errors.get(Field::Interests),
            Some("You can select up to 4 interests")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn processing_rejects_resubmission_and_edits() {
        let svc = service(Layout::SinglePage);
        let id = at_payment(&svc).await;
        svc.submit_payment(id).await.unwrap();

        assert!(matches!(
            svc.submit_payment(id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            svc.apply_updates(id, vec![DraftUpdate::Cvc("999".into())]).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(svc.back(id).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn invalid_card_keeps_session_editing() {
        let svc = service(Layout::SinglePage);
        let id = at_payment(&svc).await;
        svc.apply_updates(id, vec![DraftUpdate::Expiry("1".into())])
            .await
            .unwrap();

        let err = svc.submit_payment(id).await.unwrap_err();
        assert_eq!(err.field_errors().unwrap().focus(), Some(Field::Expiry));
        assert_eq!(svc.get(id).await.unwrap().phase, Phase::Editing);
    }

    #[tokio::test]
    async fn declined_payment_returns_to_payment_step() {
        let svc = service_with(Arc::new(DecliningGateway), Layout::SinglePage);
        let id = at_payment(&svc).await;
        svc.submit_payment(id).await.unwrap();

        // Settlement runs on its own task.
        for _ in 0..50 {
            if svc.get(id).await.unwrap().phase == Phase::Editing {
                break;
            }
            tokio::task::yield_now().await;
        }
        let session = svc.get(id).await.unwrap();
        assert_eq!(session.phase, Phase::Editing);
        assert_eq!(session.step, Step::Payment);
        assert_eq!(session.errors.get(Field::CardNumber), Some("Card was declined"));
        assert!(session.draft.is_some());
    }

    #[tokio::test]
    async fn gateway_failure_asks_for_retry() {
        let svc = service_with(Arc::new(UnreachableGateway), Layout::SinglePage);
        let id = at_payment(&svc).await;
        svc.submit_payment(id).await.unwrap();

        for _ in 0..50 {
            if svc.get(id).await.unwrap().phase == Phase::Editing {
                break;
            }
            tokio::task::yield_now().await;
        }
        let session = svc.get(id).await.unwrap();
        assert_eq!(session.phase, Phase::Editing);
        assert_eq!(session.errors.get(Field::CardNumber), Some(GATEWAY_FAILURE));
    }

    #[tokio::test]
    async fn discard_removes_session() {
        let svc = service(Layout::Wizard);
        let id = svc.create(None).await.unwrap().id;
        svc.discard(id).await.unwrap();
        assert!(matches!(svc.get(id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.discard(id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn create_honours_layout_override() {
        let svc = service(Layout::Wizard);
        let session = svc.create(Some(Layout::SinglePage)).await.unwrap();
        assert_eq!(session.step, Step::Survey);
        assert_eq!(svc.active_sessions().await, 1);
    }
}
