//! Interactive analytics session

use anyhow::Result;
use customernexus_analytics::{init_graph, run_menu};
use customernexus_core::Config;
use customernexus_storage::GraphClientTrait;
use std::io::{BufRead, Write};

/// Prepare the account projection, then serve the menu
///
/// Returns the number of queries run.
pub async fn run_query_session<R, W>(
    config: &Config,
    client: &dyn GraphClientTrait,
    input: R,
    prompt: W,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    init_graph(client, &config.analytics).await?;
    Ok(run_menu(client, &config.analytics, input, prompt).await?)
}
