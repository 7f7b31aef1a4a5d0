use std::{io, net};

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::{MailchimpSettings, Settings};
use crate::provider::mailchimp::MailchimpClient;
use crate::provider::NewsletterProvider;
use crate::routes::{healthcheck, newsletter, subscribe, subscribe_usage};

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        // Build the Mailchimp API client and the provider delegate
        let mailchimp_client = config.mailchimp.client()?;
        let provider = NewsletterProvider::new(
            config.newsletter.provider,
            config.mailchimp.clone(),
            mailchimp_client.clone(),
        );

        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, config.mailchimp, mailchimp_client, provider)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    mailchimp: MailchimpSettings,
    mailchimp_client: MailchimpClient,
    provider: NewsletterProvider,
) -> anyhow::Result<Server> {
    // Prepare data to be added to the application context
    let mailchimp = web::Data::new(mailchimp);
    let mailchimp_client = web::Data::new(mailchimp_client);
    let provider = web::Data::new(provider);

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/healthcheck", web::get().to(healthcheck))
            .route("/newsletter", web::get().to(newsletter))
            .route("/newsletter", web::post().to(newsletter))
            .route("/subscribe", web::get().to(subscribe_usage))
            .route("/subscribe", web::post().to(subscribe))
            .app_data(mailchimp.clone())
            .app_data(mailchimp_client.clone())
            .app_data(provider.clone())
    })
    .listen(listener)?
    .run())
}
