// Setup pipeline: directory -> credentials -> API validation -> memory files

use crate::api::{MoltMarketsApi, UserProfile};
use crate::config::SetupConfig;
use crate::credentials::Credentials;
use crate::error::SetupResult;
use crate::scaffold::{ensure_dir, scaffold, ScaffoldReport};
use crate::templates::default_memory_files;
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

/// Pipeline position. Any step can fail; there is no rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    Start,
    DirectoryEnsured,
    CredentialsLoaded,
    CredentialsValidated,
    FilesScaffolded,
    Done,
    Failed,
}

impl SetupStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupStage::Start => "start",
            SetupStage::DirectoryEnsured => "directory-ensured",
            SetupStage::CredentialsLoaded => "credentials-loaded",
            SetupStage::CredentialsValidated => "credentials-validated",
            SetupStage::FilesScaffolded => "files-scaffolded",
            SetupStage::Done => "done",
            SetupStage::Failed => "failed",
        }
    }

    /// The stage a run moves to once the step after `self` succeeds.
    pub fn next(&self) -> SetupStage {
        match self {
            SetupStage::Start => SetupStage::DirectoryEnsured,
            SetupStage::DirectoryEnsured => SetupStage::CredentialsLoaded,
            SetupStage::CredentialsLoaded => SetupStage::CredentialsValidated,
            SetupStage::CredentialsValidated => SetupStage::FilesScaffolded,
            SetupStage::FilesScaffolded => SetupStage::Done,
            SetupStage::Done | SetupStage::Failed => *self,
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct SetupSummary {
    pub directory_created: bool,
    pub username: String,
    pub user: UserProfile,
    pub files: ScaffoldReport,
}

struct SetupRun<'a> {
    config: &'a SetupConfig,
    stage: SetupStage,
    /// Stage that was being attempted when the run failed
    failed_at: Option<SetupStage>,
}

impl<'a> SetupRun<'a> {
    fn advance(&mut self, next: SetupStage) {
        debug!("setup stage {} -> {}", self.stage.as_str(), next.as_str());
        self.stage = next;
    }

    fn fail(&mut self) -> SetupStage {
        let attempted = self.stage.next();
        self.failed_at = Some(attempted);
        self.advance(SetupStage::Failed);
        attempted
    }

    async fn execute(&mut self) -> SetupResult<SetupSummary> {
        let memory_dir = &self.config.memory_dir;
        let directory_created = ensure_dir(memory_dir)?;
        if directory_created {
            println!("✓ Created {}/ directory", memory_dir.display());
            info!("Created memory directory {}", memory_dir.display());
        }
        self.advance(SetupStage::DirectoryEnsured);

        let credentials = Credentials::load(&self.config.credentials_path)?;
        println!("✓ Found credentials for user: {}", credentials.username);
        info!(user_id = %credentials.user_id, "Loaded credentials for {}", credentials.username);
        self.advance(SetupStage::CredentialsLoaded);

        let api = MoltMarketsApi::new(self.config.api_url.clone())?;
        let user = api.validate_api_key(&credentials).await?;
        println!("✓ API key valid. Balance: {}ŧ", user.balance);
        info!("API key valid, balance {}", user.balance);
        self.advance(SetupStage::CredentialsValidated);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let files = default_memory_files(&timestamp, user.balance.clone())?;
        let report = scaffold(memory_dir, &files)?;
        info!(
            "Scaffolded memory files: {} created, {} skipped",
            report.created.len(),
            report.skipped.len()
        );
        self.advance(SetupStage::FilesScaffolded);

        self.advance(SetupStage::Done);
        Ok(SetupSummary {
            directory_created,
            username: credentials.username,
            user,
            files: report,
        })
    }
}

/// Run the whole setup against the given configuration.
pub async fn run_setup(config: &SetupConfig) -> SetupResult<SetupSummary> {
    let mut run = SetupRun::new(config);
    run.run().await
}

impl<'a> SetupRun<'a> {
    fn new(config: &'a SetupConfig) -> Self {
        Self {
            config,
            stage: SetupStage::Start,
            failed_at: None,
        }
    }

    async fn run(&mut self) -> SetupResult<SetupSummary> {
        let result = self.execute().await;
        if let Err(e) = &result {
            let attempted = self.fail();
            // The binary prints the single user-facing diagnostic.
            debug!(stage = attempted.as_str(), "setup aborted: {}", e);
        }
        result
    }
}

/// Lines printed after a successful run
pub fn next_steps(memory_dir: &str) -> Vec<String> {
    vec![
        "1. Create cron jobs using definitions in references/cron-definitions.md".to_string(),
        format!(
            "2. Review and customize config in {}/moltmarkets-shared-state.json",
            memory_dir
        ),
        format!(
            "3. Monitor performance in {0}/trader-learnings.md and {0}/creator-learnings.md",
            memory_dir
        ),
    ]
}
