//! Executes database actions
//!
//! Turns an [`Action`] into one round trip against a [`CatalogProvider`]
//! and reports the outcome as an [`AppEvent`]. Errors never escape: they
//! become [`AppEvent::ActionFailed`] so the UI can show them.

use crate::app::{Action, AppEvent};
use crate::config::ConnectionConfig;
use crate::db::CatalogProvider;
use crate::error::DbError;
use crate::layer::{DataSource, VectorLayer};
use crate::search::Selection;

/// Title of every error dialog raised by a failed action
pub const ERROR_TITLE: &str = "Erreur";

pub struct ActionRunner<'a, P: CatalogProvider> {
    provider: &'a P,
    config: &'a ConnectionConfig,
    preview_rows: usize,
}

impl<'a, P: CatalogProvider> ActionRunner<'a, P> {
    pub fn new(provider: &'a P, config: &'a ConnectionConfig, preview_rows: usize) -> Self {
        Self {
            provider,
            config,
            preview_rows,
        }
    }

    /// Run a database action. Returns `None` for actions that need no database.
    pub async fn run(&self, action: Action) -> Option<AppEvent> {
        let event = match action {
            Action::Search(pattern) => match self.provider.search(pattern.as_str()).await {
                Ok(rows) => AppEvent::SearchCompleted(rows),
                Err(e) => failed("Erreur lors de la recherche", &e),
            },
            Action::LoadLayer(selection) => self.load_layer(selection).await,
            Action::ShowMetadata(selection) => {
                match self
                    .provider
                    .relation_metadata(&selection.schema, &selection.name)
                    .await
                {
                    Ok(metadata) => AppEvent::MetadataLoaded {
                        selection,
                        metadata,
                    },
                    Err(e) => failed("Erreur lors de la récupération des métadonnées", &e),
                }
            }
            Action::Preview(selection) => {
                match self
                    .provider
                    .preview(&selection.schema, &selection.name, self.preview_rows)
                    .await
                {
                    Ok(results) => AppEvent::PreviewLoaded { selection, results },
                    Err(e) => failed("Erreur lors de la récupération des données", &e),
                }
            }
            Action::Quit | Action::None => return None,
        };
        Some(event)
    }

    async fn load_layer(&self, selection: Selection) -> AppEvent {
        let Selection { schema, name, .. } = &selection;

        let geometry_column = match self.provider.geometry_column(schema, name).await {
            Ok(column) => column,
            Err(e) => {
                tracing::warn!(%schema, table = %name, error = %e, "geometry column lookup failed");
                None
            }
        };

        if let Err(e) = self.provider.check_readable(schema, name).await {
            tracing::warn!(layer = %selection.qualified_name(), error = %e, "invalid layer");
            return AppEvent::ActionFailed {
                title: ERROR_TITLE.to_string(),
                message: format!("Impossible de charger la couche {}", selection.qualified_name()),
            };
        }

        let source = DataSource::new(self.config, schema, name, geometry_column);
        AppEvent::LayerReady(VectorLayer::from_source(&source))
    }
}

fn failed(context: &str, error: &DbError) -> AppEvent {
    tracing::error!(error = %error, "{}", context);
    AppEvent::ActionFailed {
        title: ERROR_TITLE.to_string(),
        message: format!("{} :\n{}", context, error),
    }
}
