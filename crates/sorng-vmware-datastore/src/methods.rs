//! Typed vim25 method calls.
//!
//! One function per remote method: encode the request, hand it to the
//! transport, decode what comes back. Transport errors pass through as-is.

use crate::error::{VmwareError, VmwareResult};
use crate::soap::{self, RoundTripper};
use crate::types::*;

async fn invoke<R: VimRequest>(rt: &dyn RoundTripper, request: &R) -> VmwareResult<String> {
    let envelope = soap::encode_envelope(request)?;
    rt.round_trip(R::METHOD, envelope).await
}

async fn invoke_task<R: VimRequest>(
    rt: &dyn RoundTripper,
    request: &R,
) -> VmwareResult<ManagedObjectReference> {
    let body = invoke(rt, request).await?;
    soap::decode_returnval(&body)?.ok_or_else(|| {
        VmwareError::parse(format!("{} response carried no task reference", R::METHOD))
    })
}

pub async fn retrieve_service_content(
    rt: &dyn RoundTripper,
    request: &RetrieveServiceContent,
) -> VmwareResult<ServiceContent> {
    let body = invoke(rt, request).await?;
    soap::decode_service_content(&body)
}

pub async fn copy_datastore_file_task(
    rt: &dyn RoundTripper,
    request: &CopyDatastoreFileTask,
) -> VmwareResult<ManagedObjectReference> {
    invoke_task(rt, request).await
}

pub async fn delete_datastore_file_task(
    rt: &dyn RoundTripper,
    request: &DeleteDatastoreFileTask,
) -> VmwareResult<ManagedObjectReference> {
    invoke_task(rt, request).await
}

/// `MakeDirectory` completes synchronously; the response body is empty.
pub async fn make_directory(rt: &dyn RoundTripper, request: &MakeDirectory) -> VmwareResult<()> {
    invoke(rt, request).await?;
    Ok(())
}

pub async fn move_datastore_file_task(
    rt: &dyn RoundTripper,
    request: &MoveDatastoreFileTask,
) -> VmwareResult<ManagedObjectReference> {
    invoke_task(rt, request).await
}
