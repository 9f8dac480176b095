//! Registration, email verification, and login orchestration.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use fitauth_core::config::{AuthConfig, OtpConfig, RequireVerified, ttl_duration};
use fitauth_core::error::{AppError, ErrorKind};
use fitauth_core::result::AppResult;
use fitauth_core::traits::{Clock, Notifier, OutboundMessage};
use fitauth_core::types::{AccountId, GymId};
use fitauth_database::store::AccountStore;
use fitauth_entity::account::{Account, AccountProfile, AccountRole, AccountUpdate, NewAccount};

use crate::crypto::constant_time_eq;
use crate::jwt::{BOOTSTRAP_ADMIN_SUBJECT, Claims, IssuedToken, TokenIssuer};
use crate::otp::OtpManager;
use crate::password::{PasswordHasher, PasswordValidator, normalize_email, validate_email};

/// The client a login request arrives from. Decides token lifetime and role checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginSurface {
    /// Mobile app login for registered users. Ignores any expected role.
    App,
    /// Web dashboard login for admins, managers and trainers. Enforces the expected role.
    Dashboard,
}

impl LoginSurface {
    /// Whether a supplied expected role is checked against the stored one.
    pub fn enforces_role(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// Input to [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    /// Email address; normalised before use.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Actor class of the new account.
    pub role: AccountRole,
    /// Gym scope. Must be absent for admins.
    pub tenant_ref: Option<GymId>,
    /// Profile fields.
    pub profile: AccountProfile,
}

/// Input to [`AuthService::login`].
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Email address; normalised before use.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Portal the user believes they belong to.
    pub expected_role: Option<AccountRole>,
}

/// Bootstrap admin credential held in memory.
#[derive(Debug)]
struct BootstrapAdmin {
    email: String,
    password: SecretString,
}

/// Per-surface token lifetimes and per-role verification requirements.
#[derive(Debug, Clone, Copy)]
struct LoginPolicy {
    app_ttl: Duration,
    dashboard_ttl: Duration,
    require_verified: RequireVerified,
}

impl LoginPolicy {
    fn ttl(&self, surface: LoginSurface) -> Duration {
        match surface {
            LoginSurface::App => self.app_ttl,
            LoginSurface::Dashboard => self.dashboard_ttl,
        }
    }

    fn requires_verified(&self, role: AccountRole) -> bool {
        match role {
            AccountRole::Admin => self.require_verified.admin,
            AccountRole::Manager => self.require_verified.manager,
            AccountRole::Trainer => self.require_verified.trainer,
            AccountRole::Trainee => self.require_verified.trainee,
        }
    }
}

/// Orchestrates the account lifecycle:
/// unregistered, pending verification, active, token issuance.
#[derive(Debug, Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    otp: Arc<OtpManager>,
    notifier: Arc<dyn Notifier>,
    tokens: Arc<TokenIssuer>,
    clock: Arc<dyn Clock>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    policy: LoginPolicy,
    bootstrap: Option<Arc<BootstrapAdmin>>,
    otp_subject: String,
    otp_ttl_minutes: u64,
}

impl AuthService {
    /// Creates the service with all required collaborators.
    ///
    /// Fails with `ErrorKind::Configuration` when a token lifetime is zero or out of range.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        otp: Arc<OtpManager>,
        notifier: Arc<dyn Notifier>,
        tokens: Arc<TokenIssuer>,
        clock: Arc<dyn Clock>,
        auth_config: &AuthConfig,
        otp_config: &OtpConfig,
    ) -> AppResult<Self> {
        let bootstrap = auth_config.bootstrap_admin.as_ref().map(|admin| {
            Arc::new(BootstrapAdmin {
                email: normalize_email(&admin.email),
                password: SecretString::from(admin.password.expose_secret().to_string()),
            })
        });

        let policy = LoginPolicy {
            app_ttl: ttl_duration(
                "auth.app_token_ttl_minutes",
                auth_config.app_token_ttl_minutes,
            )?,
            dashboard_ttl: ttl_duration(
                "auth.dashboard_token_ttl_minutes",
                auth_config.dashboard_token_ttl_minutes,
            )?,
            require_verified: auth_config.require_verified,
        };

        Ok(Self {
            accounts,
            otp,
            notifier,
            tokens,
            clock,
            hasher: Arc::new(PasswordHasher::new()?),
            validator: PasswordValidator::new(auth_config),
            policy,
            bootstrap,
            otp_subject: otp_config.subject.clone(),
            otp_ttl_minutes: otp_config.ttl_minutes,
        })
    }

    /// Creates an unverified account and sends it a verification code.
    ///
    /// Fails with `ErrorKind::Conflict` if the email is taken by any
    /// account, whatever its role. Delivery of the code is best-effort and
    /// never fails the registration.
    pub async fn register(&self, registration: Registration) -> AppResult<AccountId> {
        let email = normalize_email(&registration.email);
        validate_email(&email)?;
        self.validator.validate(&registration.password)?;

        if registration.role.is_admin() && registration.tenant_ref.is_some() {
            return Err(AppError::validation("Admin accounts cannot belong to a gym"));
        }

        if self.is_bootstrap_email(&email) {
            return Err(AppError::conflict("Email already registered"));
        }

        if self.accounts.find_by_email(&email).await?.is_some() {
            warn!(role = %registration.role, "Registration rejected: email already registered");
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&registration.password)?;
        let account = Account::create(
            NewAccount {
                email: email.clone(),
                password_hash,
                role: registration.role,
                tenant_ref: registration.tenant_ref,
                profile: registration.profile,
            },
            self.clock.now(),
        );

        // The store's uniqueness constraint decides concurrent registrations.
        let account_id = self.accounts.insert(&account).await?;

        info!(account_id = %account_id, role = %account.role, "Account registered");

        self.send_challenge(&email).await;

        Ok(account_id)
    }

    /// Checks a submitted code and marks the account verified on success.
    ///
    /// Returns `false` for a wrong, expired, or absent code alike. Any
    /// pending code is consumed by the attempt.
    pub async fn verify_email(&self, email: &str, code: &str) -> AppResult<bool> {
        let email = normalize_email(email);

        if !self.otp.verify(&email, code).await? {
            return Ok(false);
        }

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            warn!("Verification code matched but no account exists");
            return Ok(false);
        };

        if !account.verified {
            self.accounts
                .update(account.id, &AccountUpdate::mark_verified())
                .await?;
        }

        info!(account_id = %account.id, "Email verified");
        Ok(true)
    }

    /// Sends a fresh code to a pending account, replacing the previous one.
    ///
    /// Unknown and already verified emails are silently ignored.
    pub async fn reissue(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);

        match self.accounts.find_by_email(&email).await? {
            Some(account) if !account.verified => {
                debug!(account_id = %account.id, "Reissuing verification code");
                self.send_challenge(&email).await;
            }
            _ => debug!("Reissue ignored: no pending account for email"),
        }
        Ok(())
    }

    /// Authenticates credentials and issues a token sized for `surface`.
    ///
    /// Errors, in order of evaluation:
    /// `NotFound` (no account), `RoleMismatch` (dashboard surface only),
    /// `InvalidCredentials` (wrong password), `Forbidden` (unverified
    /// email where the role requires verification).
    pub async fn login(&self, credentials: Credentials, surface: LoginSurface) -> AppResult<IssuedToken> {
        let email = normalize_email(&credentials.email);

        if surface == LoginSurface::Dashboard && self.is_bootstrap_email(&email) {
            return self.login_bootstrap(&credentials);
        }

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(surface = ?surface, "Login rejected: no such account");
                AppError::not_found("No account registered for this email")
            })?;

        if surface.enforces_role() {
            if let Some(expected) = credentials.expected_role {
                if expected != account.role {
                    warn!(
                        account_id = %account.id,
                        expected = %expected,
                        actual = %account.role,
                        "Login rejected: role mismatch"
                    );
                    return Err(AppError::role_mismatch(format!(
                        "This account cannot sign in as {expected}"
                    )));
                }
            }
        }

        if !self
            .hasher
            .verify_password(&credentials.password, &account.password_hash)
        {
            warn!(account_id = %account.id, "Login rejected: invalid password");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        if !account.verified && self.policy.requires_verified(account.role) {
            warn!(account_id = %account.id, "Login rejected: email not verified");
            return Err(AppError::forbidden("Email address has not been verified"));
        }

        let issued = self.tokens.issue(
            &account.id.to_string(),
            account.role,
            account.tenant_ref,
            self.policy.ttl(surface),
        )?;

        info!(
            account_id = %account.id,
            role = %account.role,
            surface = ?surface,
            "Login successful"
        );
        Ok(issued)
    }

    /// Loads the stored account behind a validated token.
    ///
    /// The bootstrap admin has no stored account and yields `NotFound`.
    pub async fn identity(&self, claims: &Claims) -> AppResult<Account> {
        if claims.is_bootstrap_admin() {
            return Err(AppError::not_found("The bootstrap admin has no account record"));
        }
        let id = claims
            .account_id()
            .ok_or_else(|| AppError::malformed("Token subject is not an account id"))?;
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    fn is_bootstrap_email(&self, email: &str) -> bool {
        self.bootstrap
            .as_ref()
            .is_some_and(|admin| constant_time_eq(&admin.email, email))
    }

    fn login_bootstrap(&self, credentials: &Credentials) -> AppResult<IssuedToken> {
        let Some(admin) = self.bootstrap.as_ref() else {
            return Err(AppError::not_found("No account registered for this email"));
        };

        if credentials
            .expected_role
            .is_some_and(|role| role != AccountRole::Admin)
        {
            warn!("Bootstrap admin login rejected: role mismatch");
            return Err(AppError::role_mismatch("This account can only sign in as admin"));
        }

        if !constant_time_eq(admin.password.expose_secret(), &credentials.password) {
            warn!("Bootstrap admin login rejected: invalid password");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        let issued = self.tokens.issue(
            BOOTSTRAP_ADMIN_SUBJECT,
            AccountRole::Admin,
            None,
            self.policy.ttl(LoginSurface::Dashboard),
        )?;
        info!("Bootstrap admin login successful");
        Ok(issued)
    }

    /// Issues a code for `email` and hands it to the notifier in the background.
    async fn send_challenge(&self, email: &str) {
        let code = match self.otp.issue(email).await {
            Ok(code) => code,
            Err(e) => {
                // The account stays pending; the user can ask for a resend.
                error!(error = %e, "Failed to issue verification code");
                return;
            }
        };

        let message = OutboundMessage {
            to: email.to_string(),
            subject: self.otp_subject.clone(),
            body: format!(
                "Your verification code is {code}\n\nIt expires in {} minutes.",
                self.otp_ttl_minutes
            ),
        };

        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.send(message).await {
                warn!(
                    kind = %ErrorKind::DeliveryFailed,
                    error = %e,
                    "Verification email could not be delivered"
                );
            }
        });
    }
}
