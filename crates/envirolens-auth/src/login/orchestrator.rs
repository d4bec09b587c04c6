use std::{
    future::Future,
    sync::{Mutex, MutexGuard},
};

use envirolens_core::SessionUser;
use envirolens_vault::CredentialVault;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{CredentialCache, LoginError, LoginFormState, LoginOutcome, LoginPhase};
use crate::{validation::validate_login, BiometricGate, IdentityResolver, SessionAuthenticator};

const CACHE_FAILED_NOTICE: &str = "Biometric login unavailable: could not save credentials.";

type AttemptResult = Result<(SessionUser, CredentialCache), LoginError>;

struct Attempts {
    form: LoginFormState,
    /// Incremented by every attempt, reset and teardown. Results of older attempts are discarded.
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Drives the login form: validation, username resolution, authentication, credential caching
/// and biometric unlock.
///
/// At most one attempt is in flight. A submission made while `loading` is set does nothing.
/// Navigation to the authenticated views is driven by the session becoming current, which only
/// happens on [`LoginPhase::Success`].
pub struct LoginOrchestrator {
    resolver: IdentityResolver,
    authenticator: SessionAuthenticator,
    vault: CredentialVault,
    biometric: BiometricGate,

    state: Mutex<Attempts>,
    phase: watch::Sender<LoginPhase>,
    shutdown: CancellationToken,
}

impl LoginOrchestrator {
    #[allow(missing_docs)]
    pub fn new(
        resolver: IdentityResolver,
        authenticator: SessionAuthenticator,
        vault: CredentialVault,
        biometric: BiometricGate,
    ) -> Self {
        let (phase, _) = watch::channel(LoginPhase::Idle);
        Self {
            resolver,
            authenticator,
            vault,
            biometric,
            state: Mutex::new(Attempts {
                form: LoginFormState::default(),
                generation: 0,
                in_flight: None,
            }),
            phase,
            shutdown: CancellationToken::new(),
        }
    }

    /// Snapshot of the form.
    pub fn form(&self) -> LoginFormState {
        self.lock().form.clone()
    }

    #[allow(missing_docs)]
    pub fn phase(&self) -> LoginPhase {
        self.phase.borrow().clone()
    }

    /// Observe phase changes.
    pub fn subscribe(&self) -> watch::Receiver<LoginPhase> {
        self.phase.subscribe()
    }

    /// Signs in with a username and password.
    ///
    /// The username is resolved to the account email, which is cached together with the password
    /// for biometric login once the identity provider accepts them. A caching failure does not
    /// fail the login, it is reported through [`LoginOutcome::Authenticated`] and the form's
    /// notice.
    pub async fn submit(&self, handle: &str, secret: &str) -> Result<LoginOutcome, LoginError> {
        let (generation, token) = {
            let mut state = self.lock();
            if !self.accepts_submit() {
                debug!("Ignoring submit, an attempt is in flight");
                return Ok(LoginOutcome::Ignored);
            }

            state.form.handle = handle.to_owned();
            state.form.set_secret(secret);
            state.form.attempted = true;
            state.form.error_message = None;
            state.form.notice = None;
            self.phase.send_replace(LoginPhase::Validating);

            if let Err(e) = validate_login(handle, secret) {
                let error = LoginError::from(e);
                self.fail(&mut state, &error);
                return Err(error);
            }

            self.begin_attempt(&mut state, LoginPhase::ResolvingHandle)
        };

        let attempt = async {
            let identifier = self.resolver.resolve(handle).await?;

            self.advance(generation, LoginPhase::Authenticating);
            let user = self.authenticator.verify(&identifier, secret).await?;

            let credential_cache = self.cache_credential(&identifier, secret).await;
            Ok::<_, LoginError>((user, credential_cache))
        };

        let result = run_until_cancelled(&token, attempt).await;
        self.finish(generation, result)
    }

    /// Signs in with the cached credential after a biometric challenge.
    ///
    /// The username resolver is not consulted, the cached email is used as is.
    pub async fn submit_biometric(&self) -> Result<LoginOutcome, LoginError> {
        let (generation, token) = {
            let mut state = self.lock();
            if !self.accepts_submit() {
                debug!("Ignoring biometric submit, an attempt is in flight");
                return Ok(LoginOutcome::Ignored);
            }

            state.form.error_message = None;
            state.form.notice = None;
            self.begin_attempt(&mut state, LoginPhase::BiometricChallenge)
        };

        let attempt = async {
            self.biometric.challenge().await?;
            let credential = self
                .vault
                .retrieve()
                .await
                .ok_or(LoginError::NoSavedCredentials)?;

            self.advance(generation, LoginPhase::Authenticating);
            let user = self
                .authenticator
                .verify(&credential.identifier, credential.secret())
                .await?;

            Ok::<_, LoginError>((user, CredentialCache::Unchanged))
        };

        let result = run_until_cancelled(&token, attempt).await;
        self.finish(generation, result)
    }

    /// Abandons the in-flight attempt and clears the form. The orchestrator stays usable.
    pub fn reset(&self) {
        let mut state = self.lock();
        self.discard(&mut state);
        debug!("Login form reset");
    }

    /// Abandons the in-flight attempt and clears the form. Later submissions are ignored.
    pub fn teardown(&self) {
        let mut state = self.lock();
        self.shutdown.cancel();
        self.discard(&mut state);
        debug!("Login form torn down");
    }

    /// Must be called with the state locked.
    fn accepts_submit(&self) -> bool {
        !self.shutdown.is_cancelled() && self.phase.borrow().accepts_submit()
    }

    fn lock(&self) -> MutexGuard<'_, Attempts> {
        self.state.lock().expect("Mutex is not poisoned")
    }

    fn begin_attempt(
        &self,
        state: &mut Attempts,
        phase: LoginPhase,
    ) -> (u64, CancellationToken) {
        state.generation += 1;
        state.form.loading = true;

        let token = self.shutdown.child_token();
        state.in_flight = Some(token.clone());
        self.phase.send_replace(phase);

        (state.generation, token)
    }

    /// Moves to `phase` unless the attempt was superseded.
    fn advance(&self, generation: u64, phase: LoginPhase) {
        let state = self.lock();
        if state.generation == generation {
            self.phase.send_replace(phase);
        }
    }

    async fn cache_credential(&self, identifier: &str, secret: &str) -> CredentialCache {
        match self.vault.save(identifier, secret).await {
            Ok(()) => CredentialCache::Saved,
            Err(e) => {
                warn!("Failed to cache credential for biometric login: {e}");
                CredentialCache::Failed(e.to_string())
            }
        }
    }

    fn finish(
        &self,
        generation: u64,
        result: Option<AttemptResult>,
    ) -> Result<LoginOutcome, LoginError> {
        let mut state = self.lock();
        let Some(result) = result.filter(|_| state.generation == generation) else {
            debug!("Discarding result of a superseded login attempt");
            return Ok(LoginOutcome::Superseded);
        };

        state.form.loading = false;
        state.in_flight = None;

        match result {
            Ok((user, credential_cache)) => {
                if matches!(credential_cache, CredentialCache::Failed(_)) {
                    state.form.notice = Some(CACHE_FAILED_NOTICE.to_string());
                }
                // Only a current attempt may establish the session
                self.authenticator.establish(user.clone());
                self.phase.send_replace(LoginPhase::Success);
                info!(uid = %user.uid, "Login succeeded");

                Ok(LoginOutcome::Authenticated {
                    user,
                    credential_cache,
                })
            }
            Err(error) => {
                self.fail(&mut state, &error);
                Err(error)
            }
        }
    }

    fn fail(&self, state: &mut Attempts, error: &LoginError) {
        match error {
            LoginError::Transport { detail } => warn!("Login failed to reach the server: {detail}"),
            other => debug!("Login failed: {other}"),
        }

        let message = error.to_string();
        state.form.loading = false;
        state.form.error_message = Some(message.clone());
        self.phase.send_replace(LoginPhase::Failed(message));
    }

    fn discard(&self, state: &mut Attempts) {
        state.generation += 1;
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
        state.form = LoginFormState::default();
        self.phase.send_replace(LoginPhase::Idle);
    }
}

/// Runs `attempt` unless `token` is cancelled first. `None` when cancelled.
async fn run_until_cancelled(
    token: &CancellationToken,
    attempt: impl Future<Output = AttemptResult>,
) -> Option<AttemptResult> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = attempt => Some(result),
    }
}

impl std::fmt::Debug for LoginOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOrchestrator")
            .field("phase", &self.phase())
            .field("form", &self.form())
            .finish_non_exhaustive()
    }
}
