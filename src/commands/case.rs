use clap::Args;
use serde::Serialize;

use stencil::case::{self, VariantSet};

use super::CmdResult;

#[derive(Args)]
pub struct CaseArgs {
    /// Raw value, e.g. "my thing" or HTTPServer
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CaseOutput {
    input: String,
    words: Vec<String>,
    variants: VariantSet,
}

pub fn run(args: CaseArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<CaseOutput> {
    let words = case::split_words(&args.value);
    let variants = VariantSet::from_words(&words);

    Ok((
        CaseOutput {
            input: args.value,
            words,
            variants,
        },
        0,
    ))
}
