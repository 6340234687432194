//! System information and threading controls of the `core` module

use cvbridge_core::convert::to_int32;
use cvbridge_core::{CallArgs, ExternalValue, Result, TypeConverter};

use crate::backend::VisionBackend;
use crate::registry::Handler;

pub(crate) const MODULE: &str = "core";

pub(crate) const FUNCTIONS: &[(&str, Handler)] = &[
    ("getBuildInformation", get_build_information),
    ("getNumThreads", get_num_threads),
    ("setNumThreads", set_num_threads),
    ("getTickCount", get_tick_count),
    ("getTickFrequency", get_tick_frequency),
    ("getVersionMajor", get_version_major),
    ("getVersionMinor", get_version_minor),
    ("getVersionRevision", get_version_revision),
];

fn get_build_information(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    Ok(backend.build_information()?.to_external())
}

fn get_num_threads(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    Ok(backend.num_threads()?.to_external())
}

/// `setNumThreads(nthreads) -> undefined`
fn set_num_threads(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "setNumThreads expects a number";
    args.require(1, EXPECTED)?;
    let threads = to_int32(args.expect_number(0, EXPECTED)?);

    backend.set_num_threads(threads)?;
    tracing::debug!(threads, "native thread count set");
    Ok(ExternalValue::Undefined)
}

fn get_tick_count(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    Ok(backend.tick_count()?.to_external())
}

fn get_tick_frequency(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    Ok(backend.tick_frequency()?.to_external())
}

fn get_version_major(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    let (major, _, _) = backend.version()?;
    Ok(major.to_external())
}

fn get_version_minor(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    let (_, minor, _) = backend.version()?;
    Ok(minor.to_external())
}

fn get_version_revision(backend: &dyn VisionBackend, _args: &CallArgs) -> Result<ExternalValue> {
    let (_, _, revision) = backend.version()?;
    Ok(revision.to_external())
}
