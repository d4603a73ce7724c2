use std::net::TcpListener;

use actix_web::{App, HttpServer, dev::Server, web};
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    domain::TemplateId,
    email_client::EmailClient,
    routes::{get_answer, health_check, register_follower},
};

pub struct Application {
    port: u16,
    server: Server,
}

/// Community signup configuration, validated at startup.
#[derive(Clone)]
pub struct Community {
    pub contact_list_name: String,
    pub welcome_template: TemplateId,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let welcome_template = config
            .community
            .welcome_template()
            .map_err(|e| anyhow::anyhow!("Invalid welcome template id: {e}"))?;
        let community = Community {
            contact_list_name: config.community.contact_list_name,
            welcome_template,
        };

        let email_client = config.email_client.client();

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_client, community)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    community: Community,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let community = web::Data::new(community);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/answers", web::get().to(get_answer))
            .route("/api/followers", web::post().to(register_follower))
            .app_data(email_client.clone())
            .app_data(community.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
