use tracing::instrument;

use crate::navigation::{is_active, sidebar, Destination, Role, RoleRouter};

#[instrument(level = "info", skip(router))]
pub(crate) fn go(router: &RoleRouter<'_>, role: Role, target: &str) -> Destination {
    let destination = router.resolve(role, target);
    tracing::info!(%destination, external = destination.is_external(), "navigating");
    destination
}

/// `None` when the game ID is blank.
#[instrument(level = "info", skip(router))]
pub(crate) fn join(router: &RoleRouter<'_>, game_id: &str) -> Option<Destination> {
    let destination = router.join_quiz(game_id)?;
    tracing::info!(%destination, "joining quiz");
    Some(destination)
}

/// The role's sidebar, one item per line, with the item for `current`
/// marked.
pub(crate) fn menu(router: &RoleRouter<'_>, role: Role, current: Option<&Destination>) -> String {
    sidebar(role)
        .iter()
        .map(|item| {
            let href = router.resolve_key(role, item.key);
            let active = current.is_some_and(|current| is_active(current.as_str(), href.as_str()));
            let marker = if active { '>' } else { ' ' };
            format!("{marker} {} ({}) -> {}", item.label, item.key, href)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
