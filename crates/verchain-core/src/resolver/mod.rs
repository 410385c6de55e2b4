//! Chain resolution
//!
//! Drives every chain whose seed was supplied, one edge at a time. Each
//! resolved value is published and logged before the next edge starts, so
//! a failure part-way through leaves the earlier outputs in place. The first
//! failure ends the whole run.

pub mod chains;

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::config::Inputs;
use crate::output::OutputSink;
use crate::registry::{HttpTransport, RegistryClient};

pub use chains::{Chain, EdgeInput, Step};

/// One published output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOutput {
    pub chain: &'static str,
    pub name: &'static str,
    pub value: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub outputs: Vec<ResolvedOutput>,
    /// Chains not run because their seed was absent.
    pub skipped: Vec<&'static str>,
}

impl Resolution {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|output| output.name == name)
            .map(|output| output.value.as_str())
    }
}

pub struct ChainResolver<'a, T> {
    client: &'a RegistryClient<T>,
    chains: Vec<Chain>,
}

impl<'a, T: HttpTransport> ChainResolver<'a, T> {
    /// Resolver over the core, frontend and web-js chains.
    pub fn new(client: &'a RegistryClient<T>) -> Self {
        Self {
            client,
            chains: chains::all(),
        }
    }

    /// Resolver over custom chains; each is validated up front.
    pub fn with_chains(client: &'a RegistryClient<T>, chains: Vec<Chain>) -> anyhow::Result<Self> {
        for chain in &chains {
            chain.validate()?;
        }
        Ok(Self { client, chains })
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Run every chain in order, stopping at the first failure.
    pub async fn run<S>(&self, inputs: &Inputs, sink: &mut S) -> anyhow::Result<Resolution>
    where
        S: OutputSink + ?Sized,
    {
        let mut resolution = Resolution::default();
        for chain in &self.chains {
            match self.resolve_chain(chain, inputs, sink).await? {
                Some(outputs) => resolution.outputs.extend(outputs),
                None => resolution.skipped.push(chain.name),
            }
        }
        Ok(resolution)
    }

    /// Resolve one chain. Returns `None` without any lookup when its seed
    /// is absent.
    pub async fn resolve_chain<S>(
        &self,
        chain: &Chain,
        inputs: &Inputs,
        sink: &mut S,
    ) -> anyhow::Result<Option<Vec<ResolvedOutput>>>
    where
        S: OutputSink + ?Sized,
    {
        let Some(seed) = inputs.get(chain.seed) else {
            info!(
                "skipping {} chain: {} not supplied",
                chain.name,
                chain.seed.key()
            );
            return Ok(None);
        };

        let mut resolved: HashMap<&'static str, String> = HashMap::new();
        let mut outputs = Vec::with_capacity(chain.steps.len());

        for step in &chain.steps {
            let upstream = match step.input {
                EdgeInput::Seed => seed,
                EdgeInput::Output(source) => resolved.get(source).map(String::as_str).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Chain '{}': step '{}' consumes '{}' which has not been resolved",
                        chain.name,
                        step.output,
                        source
                    )
                })?,
            };

            let params = step.edge.bind(inputs, upstream);
            let value = self.client.resolve_edge(step.edge, &params).await?;

            sink.publish(step.output, &value)?;
            info!("{}={}", step.output, value);

            resolved.insert(step.output, value.clone());
            outputs.push(ResolvedOutput {
                chain: chain.name,
                name: step.output,
                value,
            });
        }

        Ok(Some(outputs))
    }
}
