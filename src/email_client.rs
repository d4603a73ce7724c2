use std::time::Duration;

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{EmailAddress, TemplateId};

/// Client for the transactional-email vendor API.
///
/// Credentials and the organization's sender identity are supplied once at
/// construction; every request authenticates with the same key/secret pair.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
    api_secret: SecretString,
    sender_email: EmailAddress,
    sender_name: String,
    default_subject: String,
}

/// A templated email to be rendered vendor-side.
///
/// Recipient and template are mandatory; sender identity and subject fall
/// back to the client's configured defaults when left unset.
pub struct TemplatedEmail {
    pub to: EmailAddress,
    pub template_id: TemplateId,
    pub from: Option<EmailAddress>,
    pub from_name: Option<String>,
    pub subject: Option<String>,
    pub variables: Map<String, Value>,
}

impl TemplatedEmail {
    pub fn new(to: EmailAddress, template_id: TemplateId) -> Self {
        Self {
            to,
            template_id,
            from: None,
            from_name: None,
            subject: None,
            variables: Map::new(),
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    #[serde(rename = "FromEmail")]
    from_email: &'a str,
    #[serde(rename = "FromName")]
    from_name: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "MJ-TemplateID")]
    template_id: &'a str,
    #[serde(rename = "MJ-TemplateLanguage")]
    template_language: &'a str,
    #[serde(rename = "Recipients")]
    recipients: Vec<Recipient<'a>>,
}

#[derive(Serialize)]
struct Recipient<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Vars")]
    vars: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct ContactListFilter<'a> {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct ManageContactRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    action: &'a str,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ContactList {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "IsDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SubscriberCount")]
    pub subscriber_count: u64,
}

#[derive(serde::Deserialize)]
struct ContactListCollection {
    #[serde(rename = "Data")]
    data: Vec<ContactList>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        api_key: String,
        api_secret: SecretString,
        sender_email: EmailAddress,
        sender_name: String,
        default_subject: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: Client::builder().timeout(timeout).build().unwrap(),
            base_url: Url::parse(&base_url).expect("Failed parsing base email api url."),
            api_key,
            api_secret,
            sender_email,
            sender_name,
            default_subject,
        }
    }

    /// Submit a templated email through the vendor's `send` resource.
    ///
    /// Vendor rejections surface unchanged; no retries.
    pub async fn send_templated_email(&self, email: &TemplatedEmail) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join("v3/send")
            .expect("Failed joining the send route to the email api url.");

        let body = SendEmailRequest {
            from_email: email.from.as_ref().unwrap_or(&self.sender_email).as_ref(),
            from_name: email.from_name.as_deref().unwrap_or(&self.sender_name),
            subject: email.subject.as_deref().unwrap_or(&self.default_subject),
            template_id: email.template_id.as_ref(),
            template_language: "true",
            recipients: vec![Recipient {
                email: email.to.as_ref(),
                vars: &email.variables,
            }],
        };

        self.http_client
            .post(url)
            .basic_auth(&self.api_key, Some(self.api_secret.expose_secret()))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Look up a contact list, optionally filtered by name.
    ///
    /// The vendor answers with a collection envelope; only the first entry is
    /// surfaced.
    pub async fn contact_list_by_name(
        &self,
        name: Option<&str>,
    ) -> Result<Option<ContactList>, reqwest::Error> {
        let url = self
            .base_url
            .join("v3/REST/contactslist")
            .expect("Failed joining the contact list route to the email api url.");

        let collection: ContactListCollection = self
            .http_client
            .get(url)
            .basic_auth(&self.api_key, Some(self.api_secret.expose_secret()))
            .query(&ContactListFilter { name })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(collection.data.into_iter().next())
    }

    /// Add an address to a contact list without overriding an existing
    /// unsubscription (the vendor's non-forcing add action).
    pub async fn add_email_to_contact_list(
        &self,
        email: &EmailAddress,
        contact_list_id: u64,
    ) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join(&format!("v3/REST/contactslist/{contact_list_id}/managecontact"))
            .expect("Failed joining the manage contact route to the email api url.");

        self.http_client
            .post(url)
            .basic_auth(&self.api_key, Some(self.api_secret.expose_secret()))
            .json(&ManageContactRequest {
                email: email.as_ref(),
                action: "addnoforce",
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
