use tracing::instrument;
use uuid::Uuid;

use crate::authoring::{DraftError, QuestionId, QuestionPatch};
use crate::session::{EditDraft, SessionError};
use crate::HandlerResult;

/// Rejected edits become a reply; a missing session is a real failure.
fn reply(result: Result<String, SessionError>) -> HandlerResult {
    match result {
        Ok(text) => Ok(text),
        Err(SessionError::Draft(err)) => {
            tracing::warn!(%err, "edit rejected");
            Ok(format!("{}. Try again.", describe(&err)))
        }
        Err(err) => Err(err.into()),
    }
}

fn describe(err: &DraftError) -> String {
    match err {
        DraftError::OutOfRange { index, len } => {
            format!("{} is out of range, expected 1 to {}", index + 1, len)
        }
        other => {
            let text = other.to_string();
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => text,
            }
        }
    }
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn show<Store: EditDraft>(store: &Store, session: Uuid) -> HandlerResult {
    reply(store.with_draft(session, |draft| Ok(draft.to_string())).await)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn add_question<Store: EditDraft>(store: &Store, session: Uuid) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| {
            let id = draft.add_question().id();
            Ok((id, draft.len()))
        })
        .await
        .map(|(id, position)| {
            tracing::info!(id, position, "question added");
            format!("Question #{id} added at position {position}.")
        });
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn edit_prompt<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
    text: String,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| {
            draft.update_question(id, QuestionPatch::new().prompt(text))
        })
        .await
        .map(|()| format!("Question #{id} text updated."));
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn edit_points<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
    points: u32,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| {
            draft.update_question(id, QuestionPatch::new().points(points))
        })
        .await
        .map(|()| format!("Question #{id} is now worth {points} point(s)."));
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn edit_option<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
    index: usize,
    text: String,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| draft.update_option(id, index, text))
        .await
        .map(|()| format!("Option {} of question #{id} updated.", index + 1));
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn edit_correctness<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
    index: usize,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| draft.set_correct_option(id, index))
        .await
        .map(|()| format!("Option {} is now the correct answer to question #{id}.", index + 1));
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn remove_question<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| Ok(draft.remove_question(id)))
        .await
        .map(|removed| match removed {
            Some(_) => {
                tracing::info!(id, "question removed");
                format!("Question #{id} deleted.")
            }
            None => format!("Question #{id} is not in the draft, nothing to delete."),
        });
    reply(result)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn move_question<Store: EditDraft>(
    store: &Store,
    session: Uuid,
    id: QuestionId,
    position: usize,
) -> HandlerResult {
    let result = store
        .with_draft(session, |draft| draft.move_question(id, position))
        .await
        .map(|()| format!("Question #{id} moved to position {}.", position + 1));
    reply(result)
}
