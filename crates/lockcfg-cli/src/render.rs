// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain-text rendering for CLI output.

use comfy_table::Table;
use lockcfg_core::{Door, Parameter, ParameterSummary, Range};

/// Table with one row per parameter and one value column per door.
/// `columns[i]` holds the rows for `doors[i]`. A blank filter shows every
/// row. Returns `None` when the filter leaves nothing to show.
pub fn parameter_table(
    doors: &[Door],
    columns: &[Vec<ParameterSummary>],
    filter: Option<&str>,
) -> Option<Table> {
    let mut table = Table::new();
    let mut header = vec!["parameter".to_owned()];
    header.extend(doors.iter().map(ToString::to_string));
    header.extend(["unit".to_owned(), "common".to_owned()]);
    table.set_header(header);

    let mut shown = 0usize;
    for parameter in Parameter::ALL {
        let cells: Vec<&ParameterSummary> = columns
            .iter()
            .filter_map(|rows| rows.iter().find(|r| r.parameter == parameter))
            .collect();
        let Some(first) = cells.first() else {
            continue;
        };
        if let Some(term) = filter.filter(|t| !t.trim().is_empty()) {
            if !cells.iter().any(|r| r.matches(term)) {
                continue;
            }
        }
        let mut row = vec![parameter.name().to_owned()];
        row.extend(cells.iter().map(|r| r.value.clone()));
        row.push(first.unit.clone().unwrap_or_default());
        row.push(yes_no(first.common).to_owned());
        table.add_row(row);
        shown += 1;
    }

    (shown > 0).then_some(table)
}

/// Multi-line description of one parameter on one door.
pub fn parameter_detail(
    parameter: Parameter,
    door: Door,
    current: &str,
    values: Option<&[String]>,
    range: Option<Range>,
    common: bool,
) -> String {
    let mut lines = vec![format!("{parameter} ({door}): {current}")];
    if let Some(values) = values {
        lines.push(format!("  choices: {}", values.join(", ")));
    }
    if let Some(range) = range {
        lines.push(format!("  range: {range}"));
    }
    lines.push(format!("  common: {}", yes_no(common)));
    lines.join("\n")
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
