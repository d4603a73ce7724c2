use actix_web::{HttpResponse, web};
use once_cell::sync::Lazy;

#[derive(serde::Deserialize)]
pub struct AnswerQuery {
    assessment: String,
    challenge: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnswerDocument {
    pub data: AnswerResource,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnswerResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'static str,
    pub attributes: AnswerAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<AnswerRelationships>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnswerAttributes {
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'static str>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnswerRelationships {
    pub assessment: RelatedResource,
    pub challenge: RelatedResource,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RelatedResource {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'static str,
}

impl AnswerDocument {
    fn belongs_to(&self, assessment_id: &str, challenge_id: &str) -> bool {
        self.data.relationships.as_ref().is_some_and(|relationships| {
            relationships.assessment.data.id == assessment_id
                && relationships.challenge.data.id == challenge_id
        })
    }
}

fn answer(
    id: &'static str,
    value: &'static str,
    result: &'static str,
    assessment_id: &'static str,
    challenge_id: &'static str,
) -> AnswerDocument {
    AnswerDocument {
        data: AnswerResource {
            kind: "answers",
            id,
            attributes: AnswerAttributes {
                value,
                result: Some(result),
            },
            relationships: Some(AnswerRelationships {
                assessment: RelatedResource {
                    data: ResourceIdentifier {
                        kind: "assessments",
                        id: assessment_id,
                    },
                },
                challenge: RelatedResource {
                    data: ResourceIdentifier {
                        kind: "challenges",
                        id: challenge_id,
                    },
                },
            }),
        },
    }
}

static CANNED_ANSWERS: Lazy<[AnswerDocument; 6]> = Lazy::new(|| {
    [
        answer(
            "ref_answer_qcu_id",
            "2",
            "ok",
            "ref_assessment_id",
            "ref_qcu_challenge_id",
        ),
        answer(
            "ref_answer_qcm_id",
            "1,3",
            "ko",
            "ref_assessment_id",
            "ref_qcm_challenge_id",
        ),
        answer(
            "ref_answer_qroc_id",
            "Bill",
            "ok",
            "ref_assessment_id",
            "ref_qroc_challenge_id",
        ),
        answer(
            "ref_answer_qrocm_id",
            "logiciel1: word\nlogiciel2: excel",
            "partially",
            "ref_assessment_id",
            "ref_qrocm_challenge_id",
        ),
        answer(
            "ref_answer_timed_id",
            "8",
            "timedout",
            "ref_timed_assessment_id",
            "ref_timed_challenge_id",
        ),
        answer(
            "ref_answer_timed_bis_id",
            "10",
            "ok",
            "ref_timed_assessment_id",
            "ref_timed_challenge_bis_id",
        ),
    ]
});

// The front-end expects a well-formed document even for unknown pairs, so a
// placeholder stands in where a not-found representation would normally go.
fn placeholder_answer() -> AnswerDocument {
    AnswerDocument {
        data: AnswerResource {
            kind: "answers",
            id: "answerId",
            attributes: AnswerAttributes {
                value: "",
                result: None,
            },
            relationships: None,
        },
    }
}

/// Scan the canned answers in declaration order; first match wins.
pub fn find_answer(assessment_id: &str, challenge_id: &str) -> AnswerDocument {
    CANNED_ANSWERS
        .iter()
        .find(|document| document.belongs_to(assessment_id, challenge_id))
        .cloned()
        .unwrap_or_else(placeholder_answer)
}

#[tracing::instrument(
    name = "Looking up a canned answer",
    skip(query),
    fields(
        assessment_id = %query.assessment,
        challenge_id = %query.challenge
    )
)]
pub async fn get_answer(query: web::Query<AnswerQuery>) -> HttpResponse {
    HttpResponse::Ok().json(find_answer(&query.assessment, &query.challenge))
}
