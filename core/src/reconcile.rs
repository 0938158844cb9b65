//! Purchase submission planning: validation, amount computation and the
//! per-line stock reconciliation diff.
//!
//! Receiving a purchase must move stock *exactly once per unit of quantity
//! change*, under edits and re-submissions. The plan computed here makes
//! that property inspectable: a submission turns into one purchase record
//! plus a set of non-zero [`StockEffect`]s, and a re-submission with no
//! quantity changes turns into an empty effect set.
//!
//! Execution (the writes, their concurrency and their best-effort failure
//! model) lives in `lunamart-store::receiving`.

use crate::error::ValidationError;
use crate::money::Money;
use crate::product::ProductId;
use crate::purchase::{Purchase, PurchaseDraft, PurchaseId, PurchaseLine};
use chrono::{DateTime, Utc};

/// A signed stock adjustment for one product, paired with the denormalized
/// name the matching journal entry will carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockEffect {
    /// Product whose counter moves.
    pub product_id: ProductId,
    /// Name copied from the line at planning time.
    pub product_name: String,
    /// Signed delta. Never zero; zero diffs produce no effect at all.
    pub delta: i64,
}

/// The outcome of planning a submission: what to persist, and which stock
/// effects to fire once the record write is accepted.
#[derive(Clone, Debug)]
pub struct SubmitPlan {
    /// The purchase record to write.
    pub record: Purchase,
    /// Per-line stock effects. Empty unless the submitted status is
    /// `Received`.
    pub effects: Vec<StockEffect>,
    /// Whether this is a create (`put`) rather than an edit (`merge`).
    pub created: bool,
}

/// Validates a submission against the previously persisted purchase.
///
/// The checks run in the form's order and stop at the first failure;
/// nothing is written before they all pass.
///
/// # Errors
///
/// The first failing rule, as a user-facing [`ValidationError`].
pub fn validate_submission(
    draft: &PurchaseDraft,
    previous: Option<&Purchase>,
) -> Result<(), ValidationError> {
    let already_received = previous.is_some_and(|p| p.status.is_received());

    if !already_received && draft.supplier.trim().is_empty() {
        return Err(ValidationError::MissingSupplier);
    }

    if draft.lines.is_empty() {
        return Err(ValidationError::EmptyPurchase);
    }

    // The lock fires before per-line content checks: an added or reshaped
    // line on a completed purchase is a lock violation, not a line with
    // missing fields.
    if already_received {
        check_received_lock(draft, previous)?;
    }

    for line in &draft.lines {
        if !already_received {
            if line.name.trim().is_empty() {
                return Err(ValidationError::MissingLineName);
            }
            if line.quantity == 0 {
                return Err(ValidationError::InvalidQuantity {
                    name: line.name.clone(),
                });
            }
        }
        if draft.status.is_received() {
            if line.price.is_negative() {
                return Err(ValidationError::InvalidPrice {
                    name: line.name.clone(),
                });
            }
            if line.received_quantity.is_none() {
                return Err(ValidationError::MissingReceivedQuantity {
                    name: line.name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Rejects any change a completed purchase no longer permits: status,
/// supplier, the line set, and each line's product id, name and ordered
/// quantity.
fn check_received_lock(
    draft: &PurchaseDraft,
    previous: Option<&Purchase>,
) -> Result<(), ValidationError> {
    let Some(previous) = previous else {
        return Ok(());
    };

    if !draft.status.is_received()
        || draft.supplier != previous.supplier
        || draft.lines.len() != previous.products.len()
    {
        return Err(ValidationError::ReceivedLocked);
    }
    for (line, prev) in draft.lines.iter().zip(&previous.products) {
        if line.product_id != prev.product_id
            || line.name != prev.name
            || line.quantity != prev.quantity
        {
            return Err(ValidationError::ReceivedLocked);
        }
    }
    Ok(())
}

/// Computes the per-line reconciliation diff against the previous persisted
/// state.
///
/// For each line: `old` is the previously received quantity (0 if the
/// purchase or line is new, or nothing was received yet), `new` is the
/// submitted `received_quantity ?? quantity`, and the effect is
/// `new − old`. Zero diffs are dropped - that is what makes re-submitting
/// an already-reconciled purchase a no-op.
#[must_use]
pub fn stock_effects(lines: &[PurchaseLine], previous: Option<&Purchase>) -> Vec<StockEffect> {
    lines
        .iter()
        .filter_map(|line| {
            let old = previous
                .and_then(|p| p.line_for(line.product_id))
                .and_then(|prev| prev.received_quantity)
                .unwrap_or(0);
            let new = line.effective_quantity();
            let delta = i64::from(new) - i64::from(old);
            (delta != 0).then(|| StockEffect {
                product_id: line.product_id,
                product_name: line.name.clone(),
                delta,
            })
        })
        .collect()
}

/// Plans a submission: validate, normalize, recompute the amount and derive
/// the stock effects.
///
/// `fresh_id` is used when the draft has no id yet (a create); `now` stamps
/// the purchase date on create - the original date is preserved on edit.
///
/// # Errors
///
/// Propagates [`validate_submission`] rejections; nothing is planned past a
/// failing rule.
pub fn plan_submission(
    draft: &PurchaseDraft,
    previous: Option<&Purchase>,
    fresh_id: PurchaseId,
    now: DateTime<Utc>,
) -> Result<SubmitPlan, ValidationError> {
    validate_submission(draft, previous)?;

    // Belt-and-suspenders re-clamp; the draft editing API already keeps the
    // invariant, but the plan is the last gate before a write.
    let lines: Vec<PurchaseLine> = draft
        .lines
        .iter()
        .map(|line| PurchaseLine {
            received_quantity: line
                .received_quantity
                .map(|q| line.clamp_received(i64::from(q))),
            ..line.clone()
        })
        .collect();

    let amount: Money = lines.iter().map(PurchaseLine::amount).sum();
    let effects = if draft.status.is_received() {
        stock_effects(&lines, previous)
    } else {
        Vec::new()
    };

    let created = draft.id.is_none();
    let record = Purchase {
        id: draft.id.clone().unwrap_or(fresh_id),
        date: previous.map_or(now, |p| p.date),
        supplier: draft.supplier.clone(),
        status: draft.status,
        products: lines,
        amount,
        archived: previous.is_some_and(|p| p.archived),
    };

    Ok(SubmitPlan {
        record,
        effects,
        created,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test code
mod tests {
    use super::*;
    use crate::purchase::{LineEdit, PurchaseStatus};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn line(id: u32, name: &str, quantity: u32) -> PurchaseLine {
        PurchaseLine {
            product_id: ProductId::new(id),
            name: name.to_string(),
            quantity,
            price: Money::ZERO,
            received_quantity: None,
        }
    }

    fn draft_with(supplier: &str, lines: Vec<PurchaseLine>) -> PurchaseDraft {
        let mut draft = PurchaseDraft::new();
        draft.set_supplier(supplier).unwrap();
        draft.lines = lines;
        draft
    }

    fn fresh_id() -> PurchaseId {
        PurchaseId::new("purchase-1".to_string())
    }

    #[test]
    fn rejects_missing_supplier_first() {
        let draft = draft_with("", vec![line(80_000_001, "Widget", 10)]);
        assert_eq!(
            validate_submission(&draft, None),
            Err(ValidationError::MissingSupplier)
        );
    }

    #[test]
    fn rejects_empty_purchase() {
        let draft = draft_with("Acme", vec![]);
        assert_eq!(
            validate_submission(&draft, None),
            Err(ValidationError::EmptyPurchase)
        );
    }

    #[test]
    fn rejects_zero_quantity_by_name() {
        let draft = draft_with("Acme", vec![line(80_000_001, "Widget", 0)]);
        assert_eq!(
            validate_submission(&draft, None),
            Err(ValidationError::InvalidQuantity {
                name: "Widget".to_string()
            })
        );
    }

    #[test]
    fn receiving_requires_price_and_received_quantity() {
        let mut draft = draft_with("Acme", vec![line(80_000_001, "Widget", 10)]);
        draft.set_status(PurchaseStatus::Received).unwrap();
        assert_eq!(
            validate_submission(&draft, None),
            Err(ValidationError::MissingReceivedQuantity {
                name: "Widget".to_string()
            })
        );

        draft.lines[0].received_quantity = Some(10);
        draft.lines[0].price = Money::from_cents(-1);
        assert_eq!(
            validate_submission(&draft, None),
            Err(ValidationError::InvalidPrice {
                name: "Widget".to_string()
            })
        );

        draft.lines[0].price = Money::ZERO;
        assert!(validate_submission(&draft, None).is_ok());
    }

    /// Scenario A: new Pending purchase with a priceless line → amount 0,
    /// no effects.
    #[test]
    fn pending_purchase_has_no_effects() {
        let draft = draft_with("Acme", vec![line(80_000_001, "Widget", 10)]);
        let plan = plan_submission(&draft, None, fresh_id(), now()).unwrap();

        assert!(plan.created);
        assert_eq!(plan.record.amount, Money::ZERO);
        assert_eq!(plan.record.status, PurchaseStatus::Pending);
        assert!(plan.effects.is_empty());
    }

    /// Scenario B: the same purchase received in full → amount 50, one +10
    /// effect.
    #[test]
    fn receiving_produces_one_effect_per_changed_line() {
        let pending = plan_submission(
            &draft_with("Acme", vec![line(80_000_001, "Widget", 10)]),
            None,
            fresh_id(),
            now(),
        )
        .unwrap()
        .record;

        let mut draft = PurchaseDraft::from_existing(&pending);
        draft.set_status(PurchaseStatus::Received).unwrap();
        draft.edit_line(0, LineEdit::Price(Money::from_pesos(5))).unwrap();
        draft.edit_line(0, LineEdit::ReceivedQuantity(10)).unwrap();

        let plan = plan_submission(&draft, Some(&pending), fresh_id(), now()).unwrap();
        assert!(!plan.created);
        assert_eq!(plan.record.amount, Money::from_pesos(50));
        assert_eq!(
            plan.effects,
            vec![StockEffect {
                product_id: ProductId::new(80_000_001),
                product_name: "Widget".to_string(),
                delta: 10,
            }]
        );
    }

    /// Scenario C: re-submitting an already-received purchase unchanged →
    /// no effects, amount unchanged.
    #[test]
    fn resubmission_without_changes_is_a_no_op() {
        let received = Purchase {
            id: fresh_id(),
            date: now(),
            supplier: "Acme".to_string(),
            status: PurchaseStatus::Received,
            products: vec![PurchaseLine {
                price: Money::from_pesos(5),
                received_quantity: Some(10),
                ..line(80_000_001, "Widget", 10)
            }],
            amount: Money::from_pesos(50),
            archived: false,
        };

        let draft = PurchaseDraft::from_existing(&received);
        let plan = plan_submission(&draft, Some(&received), fresh_id(), now()).unwrap();

        assert_eq!(plan.record.amount, Money::from_pesos(50));
        assert!(plan.effects.is_empty());
    }

    /// A received-quantity correction while already Received moves only the
    /// difference.
    #[test]
    fn corrections_move_only_the_difference() {
        let received = Purchase {
            id: fresh_id(),
            date: now(),
            supplier: "Acme".to_string(),
            status: PurchaseStatus::Received,
            products: vec![PurchaseLine {
                price: Money::from_pesos(5),
                received_quantity: Some(10),
                ..line(80_000_001, "Widget", 10)
            }],
            amount: Money::from_pesos(50),
            archived: false,
        };

        let mut draft = PurchaseDraft::from_existing(&received);
        draft.edit_line(0, LineEdit::ReceivedQuantity(7)).unwrap();

        let plan = plan_submission(&draft, Some(&received), fresh_id(), now()).unwrap();
        assert_eq!(plan.effects.len(), 1);
        assert_eq!(plan.effects[0].delta, -3);
        assert_eq!(plan.record.amount, Money::from_pesos(35));
    }

    #[test]
    fn partial_receipt_counts_received_not_ordered() {
        let pending = Purchase {
            id: fresh_id(),
            date: now(),
            supplier: "Acme".to_string(),
            status: PurchaseStatus::Sent,
            products: vec![line(80_000_001, "Widget", 10)],
            amount: Money::ZERO,
            archived: false,
        };

        let mut draft = PurchaseDraft::from_existing(&pending);
        draft.set_status(PurchaseStatus::Received).unwrap();
        draft.edit_line(0, LineEdit::Price(Money::from_pesos(2))).unwrap();
        draft.edit_line(0, LineEdit::ReceivedQuantity(4)).unwrap();

        let plan = plan_submission(&draft, Some(&pending), fresh_id(), now()).unwrap();
        assert_eq!(plan.effects[0].delta, 4);
        assert_eq!(plan.record.amount, Money::from_pesos(8));
    }

    #[test]
    fn locked_purchase_rejects_structural_changes() {
        let received = Purchase {
            id: fresh_id(),
            date: now(),
            supplier: "Acme".to_string(),
            status: PurchaseStatus::Received,
            products: vec![PurchaseLine {
                price: Money::from_pesos(5),
                received_quantity: Some(10),
                ..line(80_000_001, "Widget", 10)
            }],
            amount: Money::from_pesos(50),
            archived: false,
        };

        // A hand-built draft bypassing the editing API still cannot get a
        // structural change past validation.
        let mut draft = PurchaseDraft::from_existing(&received);
        draft.lines[0].quantity = 20;
        assert_eq!(
            validate_submission(&draft, Some(&received)),
            Err(ValidationError::ReceivedLocked)
        );

        let mut draft = PurchaseDraft::from_existing(&received);
        draft.lines.push(line(80_000_002, "Extra", 1));
        assert_eq!(
            validate_submission(&draft, Some(&received)),
            Err(ValidationError::ReceivedLocked)
        );
    }

    #[test]
    fn edit_preserves_the_original_date() {
        let pending = plan_submission(
            &draft_with("Acme", vec![line(80_000_001, "Widget", 10)]),
            None,
            fresh_id(),
            now(),
        )
        .unwrap()
        .record;

        let later = DateTime::from_timestamp_millis(1_800_000_000_000).unwrap();
        let mut draft = PurchaseDraft::from_existing(&pending);
        draft.set_status(PurchaseStatus::Sent).unwrap();
        let plan = plan_submission(&draft, Some(&pending), fresh_id(), later).unwrap();

        assert_eq!(plan.record.date, pending.date);
    }

    proptest! {
        /// The persisted amount always equals the recomputation from the
        /// record's own lines.
        #[test]
        fn amount_roundtrips_from_lines(
            quantities in proptest::collection::vec((1u32..500, 0u32..500, 0i64..100_000), 1..8)
        ) {
            let lines: Vec<PurchaseLine> = quantities
                .iter()
                .enumerate()
                .map(|(i, (qty, received, price))| {
                    #[allow(clippy::cast_possible_truncation)]
                    let id = 80_000_001 + i as u32;
                    let mut l = line(id, "Item", *qty);
                    l.price = Money::from_cents(*price);
                    l.received_quantity = Some(l.clamp_received(i64::from(*received)));
                    l
                })
                .collect();

            let mut draft = draft_with("Acme", lines);
            draft.set_status(PurchaseStatus::Received).unwrap();
            let plan = plan_submission(&draft, None, fresh_id(), now()).unwrap();
            prop_assert_eq!(plan.record.amount, plan.record.computed_amount());
        }

        /// Effects are exactly the non-zero diffs, and re-planning the
        /// persisted record against itself yields no effects.
        #[test]
        fn replanning_against_self_is_empty(
            quantities in proptest::collection::vec((1u32..500, 0u32..500), 1..8)
        ) {
            let lines: Vec<PurchaseLine> = quantities
                .iter()
                .enumerate()
                .map(|(i, (qty, received))| {
                    #[allow(clippy::cast_possible_truncation)]
                    let id = 80_000_001 + i as u32;
                    let mut l = line(id, "Item", *qty);
                    l.received_quantity = Some(l.clamp_received(i64::from(*received)));
                    l
                })
                .collect();

            let mut draft = draft_with("Acme", lines);
            draft.set_status(PurchaseStatus::Received).unwrap();
            let plan = plan_submission(&draft, None, fresh_id(), now()).unwrap();

            let redraft = PurchaseDraft::from_existing(&plan.record);
            let replan =
                plan_submission(&redraft, Some(&plan.record), fresh_id(), now()).unwrap();
            prop_assert!(replan.effects.is_empty());
        }
    }
}
