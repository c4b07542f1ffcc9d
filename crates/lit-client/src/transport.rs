//! The seam between the command layer and the connection.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Result;
use crate::validate::ReplyCheck;

/// Anything that can carry one JSON-RPC call to the node and back.
///
/// [`ConnectionManager`](crate::ConnectionManager) is the production
/// implementation; tests substitute scripted transports.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Call `method` with `params` and return the reply's `result`.
    async fn call(&self, method: &str, params: Value) -> Result<Value>;
}

/// Serialize `payload`, call `method`, validate the reply with `check`, and
/// decode it as `R`.
pub async fn invoke<T, P, R>(rpc: &T, method: &str, payload: &P, check: ReplyCheck) -> Result<R>
where
    T: RpcTransport + ?Sized,
    P: Serialize + Sync,
    R: DeserializeOwned,
{
    let params = serde_json::to_value(payload)?;
    let reply = rpc.call(method, params).await?;
    check.check(&reply)?;
    Ok(serde_json::from_value(reply)?)
}
