use chrono::NaiveDate;

use super::common::*;
use crate::approval::domain::CreditMetrics;
use crate::approval::evaluation::{
    age_in_years, ApprovalBasis, DenialReason, EligibilityConfig, EligibilityOutcome,
    EligibilityPolicy, TierTable,
};

fn adult() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date")
}

fn minor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date")
}

#[test]
fn existing_customers_are_always_approved() {
    let policy = EligibilityPolicy::default();

    for (dob, score, duration) in [
        (minor(), 0, 0),
        (adult(), 299, 0),
        (adult(), 900, 50),
        (today(), 450, 1),
    ] {
        let outcome = policy.decide(true, dob, CreditMetrics::new(score, duration), today());
        assert_eq!(
            outcome,
            EligibilityOutcome::Approved(ApprovalBasis::ExistingCustomer)
        );
    }
}

#[test]
fn age_gate_dominates_a_strong_score() {
    let policy = EligibilityPolicy::default();

    let outcome = policy.decide(false, minor(), CreditMetrics::new(800, 10), today());

    match outcome {
        EligibilityOutcome::Denied(DenialReason::Underage { age, legal_age }) => {
            assert_eq!(age, 15);
            assert_eq!(legal_age, 18);
        }
        other => panic!("expected underage denial, got {other:?}"),
    }
}

#[test]
fn applicant_turns_eligible_on_eighteenth_birthday_window() {
    let policy = EligibilityPolicy::default();
    let today = today();
    let metrics = CreditMetrics::new(800, 0);

    let just_adult = NaiveDate::from_ymd_opt(2007, 6, 14).expect("valid date");
    assert!(policy.decide(false, just_adult, metrics, today).is_approved());

    let almost_adult = NaiveDate::from_ymd_opt(2007, 7, 1).expect("valid date");
    assert!(!policy.decide(false, almost_adult, metrics, today).is_approved());
}

#[test]
fn future_birth_dates_are_underage() {
    let future = NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date");
    assert!(age_in_years(future, today(), 365.2425) < 0);

    let outcome =
        EligibilityPolicy::default().decide(false, future, CreditMetrics::new(800, 10), today());
    assert!(matches!(
        outcome,
        EligibilityOutcome::Denied(DenialReason::Underage { .. })
    ));
}

#[test]
fn every_tier_boundary_respects_minimum_duration() {
    let policy = EligibilityPolicy::default();

    for tier in TierTable::standard().tiers() {
        for score in [tier.min_score, tier.max_score] {
            let approved = policy.decide(
                false,
                adult(),
                CreditMetrics::new(score, tier.min_duration_years),
                today(),
            );
            assert_eq!(
                approved,
                EligibilityOutcome::Approved(ApprovalBasis::Tier {
                    tier: tier.name.clone()
                }),
                "score {score} with {} years",
                tier.min_duration_years
            );

            if tier.min_duration_years > 0 {
                let denied = policy.decide(
                    false,
                    adult(),
                    CreditMetrics::new(score, tier.min_duration_years - 1),
                    today(),
                );
                assert_eq!(
                    denied,
                    EligibilityOutcome::Denied(DenialReason::InsufficientDuration {
                        tier: tier.name.clone(),
                        required_years: tier.min_duration_years,
                        actual_years: tier.min_duration_years - 1,
                    })
                );
            }
        }
    }
}

#[test]
fn scores_outside_the_table_are_denied() {
    let policy = EligibilityPolicy::default();

    for score in [0, 299, 851, 1000] {
        let outcome = policy.decide(false, adult(), CreditMetrics::new(score, 40), today());
        assert_eq!(
            outcome,
            EligibilityOutcome::Denied(DenialReason::NoMatchingTier { score })
        );
    }
}

#[test]
fn legal_age_is_configurable() {
    let policy = EligibilityPolicy::new(EligibilityConfig {
        legal_age: 30,
        ..EligibilityConfig::default()
    });

    let outcome = policy.decide(false, adult(), CreditMetrics::new(800, 0), today());
    assert!(matches!(
        outcome,
        EligibilityOutcome::Denied(DenialReason::Underage { legal_age: 30, .. })
    ));
}

#[test]
fn summaries_explain_the_decision() {
    let approved = EligibilityOutcome::Approved(ApprovalBasis::Tier {
        tier: "good".to_string(),
    });
    assert_eq!(approved.summary(), "approved: meets good tier requirements");

    let denied = EligibilityOutcome::Denied(DenialReason::InsufficientDuration {
        tier: "poor".to_string(),
        required_years: 10,
        actual_years: 9,
    });
    assert!(denied.summary().contains("requires 10 year(s)"));
}
