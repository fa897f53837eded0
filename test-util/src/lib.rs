use near_sdk::serde::de::DeserializeOwned;
use near_workspaces::network::{NetworkClient, NetworkInfo};
use near_workspaces::result::ExecutionFinalResult;
use near_workspaces::{Account, Contract, DevNetwork, Worker};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// Installs a test log subscriber, filtered by `RUST_LOG` (default: `test_util=debug`).
/// Safe to call from every test, only the first call installs it.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("test_util=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Build contract from sources, deploy it on a fresh dev account and initialize it.
pub async fn build_contract<T>(
    worker: &Worker<T>,
    project_path: &str,
    init_method: &str,
    args: Value,
) -> anyhow::Result<Contract>
where
    T: NetworkInfo + NetworkClient + DevNetwork + Send + Sync,
{
    let mut wasm;
    let mut retry_count = 3;
    // Under some circumstances compilation could provide zero length built wasm. In this case we retry.
    loop {
        wasm = near_workspaces::compile_project(project_path).await?;
        if !wasm.is_empty() || retry_count == 0 {
            break;
        }
        retry_count -= 1;
    }

    let (id, sk) = worker.dev_generate().await;
    let contract = worker
        .create_tla_and_deploy(id, sk, &wasm)
        .await?
        .into_result()?;

    // initialize contract
    let _ = contract
        .call(init_method)
        .args_json(args)
        .max_gas()
        .transact()
        .await?
        .into_result()?;
    tracing::debug!(contract = %contract.id(), project_path, "contract deployed");

    Ok(contract)
}

/// Client side of a deployed vote-handler contract.
pub struct VoteHandler {
    pub contract: Contract,
}

impl VoteHandler {
    /// Builds the vote-handler crate at `project_path` and calls `new` with the given admins
    /// and config.
    pub async fn deploy<T>(
        worker: &Worker<T>,
        project_path: &str,
        admins: Vec<&Account>,
        config: Option<Value>,
    ) -> anyhow::Result<Self>
    where
        T: NetworkInfo + NetworkClient + DevNetwork + Send + Sync,
    {
        let admins: Vec<_> = admins.iter().map(|a| a.id()).collect();
        let contract = build_contract(
            worker,
            project_path,
            "new",
            json!({ "admins": admins, "config": config }),
        )
        .await?;
        Ok(Self { contract })
    }

    async fn call(
        &self,
        caller: &Account,
        function: &str,
        args: Value,
    ) -> anyhow::Result<ExecutionFinalResult> {
        let res = caller
            .call(self.contract.id(), function)
            .args_json(args)
            .max_gas()
            .transact()
            .await?;
        tracing::debug!(function, logs = ?res.logs(), "vote-handler call");
        Ok(res)
    }

    async fn view<R: DeserializeOwned>(&self, function: &str, args: Value) -> anyhow::Result<R> {
        let res = self.contract.view(function).args_json(args).await?;
        Ok(res.json()?)
    }

    pub async fn start_poll(
        &self,
        caller: &Account,
        name: &str,
        options: &[&str],
    ) -> anyhow::Result<ExecutionFinalResult> {
        self.call(
            caller,
            "start_poll",
            json!({ "name": name, "options": options }),
        )
        .await
    }

    pub async fn pause_poll(&self, caller: &Account) -> anyhow::Result<ExecutionFinalResult> {
        self.call(caller, "pause_poll", json!({})).await
    }

    pub async fn resume_poll(&self, caller: &Account) -> anyhow::Result<ExecutionFinalResult> {
        self.call(caller, "resume_poll", json!({})).await
    }

    pub async fn vote(&self, voter: &Account, option: &str) -> anyhow::Result<ExecutionFinalResult> {
        self.call(voter, "vote", json!({ "option": option })).await
    }

    pub async fn is_poll_active(&self) -> anyhow::Result<bool> {
        self.view("is_poll_active", json!({})).await
    }

    pub async fn get_current_options(&self) -> anyhow::Result<Vec<String>> {
        self.view("get_current_options", json!({})).await
    }

    pub async fn get_current_poll_name(&self) -> anyhow::Result<String> {
        self.view("get_current_poll_name", json!({})).await
    }

    /// Returns `get_stats` response parsed into `R`.
    pub async fn get_stats<R: DeserializeOwned>(&self, name: &str) -> anyhow::Result<R> {
        self.view("get_stats", json!({ "name": name })).await
    }
}
