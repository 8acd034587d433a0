//! Interactive query menu

use customernexus_core::{AnalyticsConfig, Result};
use customernexus_storage::GraphClientTrait;
use std::io::{BufRead, Write};
use tracing::{error, info};

use crate::catalog::{find_query, QUERY_CATALOG};
use crate::report::log_query_result;

const PROMPT: &str = "\nEnter the query number or 'Q' to exit: ";

/// A parsed line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Quit,
    Query(u8),
    /// A number outside the catalog
    OutOfRange(i64),
    /// Anything that is neither a number nor `Q`
    Invalid(String),
}

pub fn parse_selection(input: &str) -> MenuSelection {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return MenuSelection::Quit;
    }

    match trimmed.parse::<i64>() {
        Ok(number) => match u8::try_from(number) {
            Ok(n) if find_query(n).is_some() => MenuSelection::Query(n),
            _ => MenuSelection::OutOfRange(number),
        },
        Err(_) => MenuSelection::Invalid(trimmed.to_string()),
    }
}

fn log_menu() {
    info!(
        "  Select a query to run from 1-{} or type 'Q' to exit:",
        QUERY_CATALOG.len()
    );
    for query in &QUERY_CATALOG {
        info!("  [Q{}] {}", query.number, query.summary);
    }
}

/// Serve the menu until the operator quits or input ends
///
/// Returns the number of queries executed. Bad selections are logged and
/// re-prompted; a failing query ends the session with its error.
pub async fn run_menu<R, W>(
    client: &dyn GraphClientTrait,
    config: &AnalyticsConfig,
    mut input: R,
    mut prompt: W,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut executed = 0;

    loop {
        log_menu();
        write!(prompt, "{PROMPT}")?;
        prompt.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            info!("  Exit");
            return Ok(executed);
        }

        match parse_selection(&line) {
            MenuSelection::Quit => {
                info!("  Exit");
                return Ok(executed);
            }
            MenuSelection::Query(number) => {
                let Some(query) = find_query(number) else {
                    continue;
                };
                let result = client
                    .run_cypher(&query.render(config), query.columns)
                    .await?;
                log_query_result(query, &result);
                executed += 1;
            }
            MenuSelection::OutOfRange(_) => {
                info!(
                    "Invalid query number. Please select a number from 1 to {}.",
                    QUERY_CATALOG.len()
                );
            }
            MenuSelection::Invalid(_) => {
                error!("Invalid input. Please enter a valid number.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_selection("Q\n"), MenuSelection::Quit);
        assert_eq!(parse_selection("q"), MenuSelection::Quit);
    }

    #[test]
    fn test_parse_query_numbers() {
        for n in 1..=9u8 {
            assert_eq!(parse_selection(&n.to_string()), MenuSelection::Query(n));
        }
        assert_eq!(parse_selection(" 4 \n"), MenuSelection::Query(4));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(parse_selection("0"), MenuSelection::OutOfRange(0));
        assert_eq!(parse_selection("10"), MenuSelection::OutOfRange(10));
        assert_eq!(parse_selection("-3"), MenuSelection::OutOfRange(-3));
        assert_eq!(parse_selection("300"), MenuSelection::OutOfRange(300));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            parse_selection("exit"),
            MenuSelection::Invalid("exit".to_string())
        );
        assert_eq!(parse_selection(""), MenuSelection::Invalid(String::new()));
        assert_eq!(parse_selection("1.5"), MenuSelection::Invalid("1.5".to_string()));
    }
}
