//! Heuristic cause/effect classification of situation summaries.
//!
//! Producers in this network encode the disruption as a free text summary
//! shaped like "Maintenance:Stop moved"; the part before the colon names
//! the cause, the part after it the effect, in English or Bulgarian.

use crate::transit_realtime::alert::{Cause, Effect};

// Ordered tables: the first matching keyword wins.
const CAUSES: &[(&[&str], Cause)] = &[
    (&["maintenance", "поддръжка"], Cause::Maintenance),
    (&["construction", "строителна"], Cause::Construction),
    (
        &["technical problem", "технически проблем"],
        Cause::TechnicalProblem,
    ),
    (&["strike", "стачка"], Cause::Strike),
    (&["demonstration", "демонстрация"], Cause::Demonstration),
    (&["accident", "авария"], Cause::Accident),
    (&["holiday", "праздник"], Cause::Holiday),
    (&["weather", "време"], Cause::Weather),
    (&["police", "полиц"], Cause::PoliceActivity),
    (&["medical", "медицин"], Cause::MedicalEmergency),
    (&["unknown", "неизвестно"], Cause::UnknownCause),
    (&["other", "друго"], Cause::OtherCause),
];

const EFFECTS: &[(&[&str], Effect)] = &[
    (&["no service", "не се изпълнява"], Effect::NoService),
    (
        &["reduced service", "понижено обслужване"],
        Effect::ReducedService,
    ),
    (
        &["significant delay", "значителни закъснения"],
        Effect::SignificantDelays,
    ),
    (&["detour", "отклонение"], Effect::Detour),
    (
        &["additional service", "допълнително обслужване"],
        Effect::AdditionalService,
    ),
    (
        &["modified service", "модифицирано обслужване"],
        Effect::ModifiedService,
    ),
    (&["stop moved", "преместена спирка"], Effect::StopMoved),
    (
        &["no impact", "no effect", "няма ефект"],
        Effect::NoEffect,
    ),
    (
        &["accessibility", "достъпност"],
        Effect::AccessibilityIssue,
    ),
    (&["unknown", "неизвестно"], Effect::UnknownEffect),
    (&["other", "друго"], Effect::OtherEffect),
];

/// Infers a (cause, effect) pair from a summary.
///
/// Without a colon the whole text is matched against both tables.
pub fn classify(summary: &str) -> (Cause, Effect) {
    let lower = summary.to_lowercase();
    (cause_of(cause_part(&lower)), effect_of(effect_part(&lower)))
}

fn cause_part(summary: &str) -> &str {
    match summary.find(':') {
        Some(i) if i > 0 => &summary[..i],
        _ => summary,
    }
}

fn effect_part(summary: &str) -> &str {
    match summary.find(':') {
        Some(i) if i > 0 && i + 1 < summary.len() => &summary[i + 1..],
        _ => summary,
    }
}

fn cause_of(part: &str) -> Cause {
    for (keywords, cause) in CAUSES {
        if keywords.iter().any(|k| part.contains(k)) {
            return *cause;
        }
    }
    Cause::OtherCause
}

fn effect_of(part: &str) -> Effect {
    for (keywords, effect) in EFFECTS {
        if keywords.iter().any(|k| part.contains(k)) {
            return *effect;
        }
    }
    Effect::OtherEffect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_separated_summary() {
        assert_eq!(
            classify("Maintenance:Stop moved"),
            (Cause::Maintenance, Effect::StopMoved)
        );
        assert_eq!(
            classify("Construction: significant delays expected"),
            (Cause::Construction, Effect::SignificantDelays)
        );
    }

    #[test]
    fn bulgarian_keywords() {
        assert_eq!(
            classify("Стачка:Не се изпълнява"),
            (Cause::Strike, Effect::NoService)
        );
        assert_eq!(
            classify("Поддръжка:Преместена спирка"),
            (Cause::Maintenance, Effect::StopMoved)
        );
    }

    #[test]
    fn no_colon_matches_both_tables_on_the_whole_text() {
        assert_eq!(classify("unknown"), (Cause::UnknownCause, Effect::UnknownEffect));
        // "detour" is only an effect keyword, the cause falls through
        assert_eq!(classify("detour"), (Cause::OtherCause, Effect::Detour));
    }

    #[test]
    fn unmatched_text_falls_back_to_other() {
        assert_eq!(
            classify("zzz:yyy"),
            (Cause::OtherCause, Effect::OtherEffect)
        );
    }

    #[test]
    fn leading_or_trailing_colon_keeps_the_whole_text() {
        assert_eq!(classify(":stop moved").1, Effect::StopMoved);
        // trailing colon: the effect part is the whole text again
        assert_eq!(classify("maintenance:").0, Cause::Maintenance);
        assert_eq!(classify("maintenance:").1, Effect::OtherEffect);
    }

    #[test]
    fn priority_order_breaks_ties() {
        // both "no service" and "significant delay" present, first table entry wins
        assert_eq!(classify("x:no service, significant delay").1, Effect::NoService);
    }
}
