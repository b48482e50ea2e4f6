//! Command and query orchestration

#![allow(clippy::result_large_err)]

pub mod engine_command;
pub mod engine_query;
pub mod references;
pub mod seed;

use std::time::Instant;

use hospital_core::errors::ExError;
use hospital_core::{log_op_end, log_op_error, log_op_start};
use hospital_core_types::RequestContext;
use hospital_store::Result;

/// Run `f` between start and end lifecycle events
///
/// Errors get the operation name and the request's correlation ids attached
/// before they are logged and returned.
pub(crate) fn logged<T>(
    op: &'static str,
    ctx: &RequestContext,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    log_op_start!(op, request_id = ctx.request_id.as_str());
    let start = Instant::now();

    let result = f().map_err(|e| with_context(e, op, ctx));

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(
                op,
                duration_ms = elapsed,
                request_id = ctx.request_id.as_str()
            );
        }
        Err(e) => {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = elapsed,
                request_id = ctx.request_id.as_str()
            );
        }
    }
    result
}

fn with_context(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let err = if err.op().is_none() { err.with_op(op) } else { err };
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}
