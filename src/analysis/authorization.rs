//! ads.txt section checks.

use super::plural;
use super::section::SectionBuilder;
use super::types::{ActionItem, CheckName, PRIORITY_MINOR, PRIORITY_WARNING};
use crate::ads_txt::AuthorizationSnapshot;
use crate::rules::RuleSet;

/// Runs the ads.txt checks in order: existence, required seller domains,
/// duplicates.
pub(super) fn evaluate_authorization(
    authorization: &AuthorizationSnapshot,
    rules: &RuleSet,
) -> SectionBuilder {
    let mut section = SectionBuilder::new();

    section.record(
        CheckName::Exists,
        authorization.exists,
        authorization.exists,
        true,
    );
    if !authorization.exists {
        section.fail(
            "ads.txt file not found",
            ActionItem::critical("Create ads.txt file to prevent unauthorized ad inventory sales"),
        );
        return section;
    }

    let present = authorization.seller_domains();
    let missing: Vec<&str> = rules
        .required_authorization_domains
        .iter()
        .filter(|required| !present.contains(&required.to_lowercase()))
        .map(String::as_str)
        .collect();
    let missing_list = missing.join(", ");
    section.record(
        CheckName::RequiredEntries,
        missing.is_empty(),
        if missing.is_empty() {
            "none missing"
        } else {
            missing_list.as_str()
        },
        rules.required_authorization_domains.join(", "),
    );
    if !missing.is_empty() {
        section.warn(
            format!("Missing critical SSP entries: {}", missing_list),
            ActionItem::warning(PRIORITY_WARNING, format!("Add to ads.txt: {}", missing_list)),
        );
    }

    let duplicates = authorization.duplicate_raw_lines.len();
    section.record(CheckName::Duplicates, duplicates == 0, duplicates, 0);
    if duplicates > 0 {
        let noun = plural(duplicates, "entry", "entries");
        section.warn(
            format!("{} duplicate {} found", duplicates, noun),
            ActionItem::warning(
                PRIORITY_MINOR,
                format!("Remove {} duplicate ads.txt {}", duplicates, noun),
            ),
        );
    }

    section
}
