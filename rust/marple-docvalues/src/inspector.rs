//! The doc-values inspector: selection state, loading and rendering.

use log::{debug, warn};
use marple_common::Result;

use crate::backend::DocValuesBackend;
use crate::config::InspectorConfig;
use crate::controller::{
    InspectorProps, LoadController, LoadPurpose, PendingLoad, Trigger, props_trigger,
};
use crate::error::InspectError;
use crate::filter::{DocFilterExpression, FILTER_PLACEHOLDER};
use crate::format::{format_doc_value, validate_kind};
use crate::model::{DocValuesResult, LoadRequest, LoadedDocValues};
use crate::negotiator::{PreferenceScope, encoding_control, settle_encoding};
use crate::notice::NoticeSink;
use crate::ordering::{DocListParser, RangeDocListParser, document_ids};
use crate::preferences::EncodingPreferences;
use crate::view::{DocRow, InspectorView, ValuesView};

/// How a resolved fetch affected the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The values and the backend's encoding were committed.
    Applied,
    /// The field has no doc values; an empty `NONE` result was committed.
    NoDocValues,
    /// The fetch failed; the previous result stays displayed.
    Failed(InspectError),
    /// A newer fetch was already applied and the ordering policy rejects this one.
    Discarded,
}

/// Inspects the doc values of one field of one segment.
///
/// The inspector owns its collaborators: the backend that loads values, the
/// store of per-field encoding preferences and the sink for operator notices.
/// Loading can be driven synchronously ([`set_props`](Self::set_props),
/// [`request_encoding`](Self::request_encoding), [`edit_filter`](Self::edit_filter)),
/// or split into [`begin`](Self::begin) and [`complete`](Self::complete) when
/// fetches resolve asynchronously and possibly out of order.
pub struct DocValueInspector<B, P, N> {
    config: InspectorConfig,
    backend: B,
    preferences: P,
    notices: N,
    parser: Box<dyn DocListParser>,
    controller: LoadController,
    props: Option<InspectorProps>,
    filter: DocFilterExpression,
    encoding: String,
    result: Option<DocValuesResult>,
    /// Whether the unknown kind of `result` was already reported.
    kind_reported: bool,
}

impl<B, P, N> DocValueInspector<B, P, N>
where
    B: DocValuesBackend,
    P: EncodingPreferences,
    N: NoticeSink,
{
    pub fn new(config: InspectorConfig, backend: B, preferences: P, notices: N) -> Self {
        let parser = RangeDocListParser {
            max_len: config.max_doclist_len,
        };
        DocValueInspector {
            controller: LoadController::new(config.response_ordering),
            encoding: config.default_encoding.clone(),
            config,
            backend,
            preferences,
            notices,
            parser: Box::new(parser),
            props: None,
            filter: DocFilterExpression::default(),
            result: None,
            kind_reported: false,
        }
    }

    pub fn with_doclist_parser(mut self, parser: impl DocListParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut N {
        &mut self.notices
    }

    pub fn props(&self) -> Option<&InspectorProps> {
        self.props.as_ref()
    }

    /// The committed doc filter.
    pub fn filter(&self) -> &DocFilterExpression {
        &self.filter
    }

    /// The encoding the backend applied to the displayed result.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn result(&self) -> Option<&DocValuesResult> {
        self.result.as_ref()
    }

    /// Stores new props and returns the trigger they fire, without loading.
    pub fn receive_props(&mut self, props: InspectorProps) -> Option<Trigger> {
        let trigger = props_trigger(self.props.as_ref(), &props);
        self.props = Some(props);
        trigger
    }

    /// Stores new props and loads if the selection changed.
    pub fn set_props(&mut self, props: InspectorProps) -> Option<LoadOutcome> {
        let trigger = self.receive_props(props)?;
        self.dispatch(trigger)
    }

    /// Asks the backend to display the field under `candidate`.
    pub fn request_encoding(&mut self, candidate: &str) -> Option<LoadOutcome> {
        self.dispatch(Trigger::EncodingRequested(candidate.to_string()))
    }

    /// Applies an edit of the doc filter input. Disallowed characters are
    /// dropped; the filter is committed once its values are loaded.
    pub fn edit_filter(&mut self, input: &str) -> Option<LoadOutcome> {
        self.dispatch(Trigger::FilterEdited(DocFilterExpression::from_input(input)))
    }

    /// Issues the fetch for `trigger`, loads it from the backend and applies it.
    /// Returns `None` when no field is selected.
    pub fn dispatch(&mut self, trigger: Trigger) -> Option<LoadOutcome> {
        let load = self.begin(trigger)?;
        let outcome = self.backend.load_doc_values(&load.request);
        Some(self.complete(load, outcome))
    }

    /// Issues the fetch for `trigger` without running it. Returns `None` when no
    /// field is selected.
    pub fn begin(&mut self, trigger: Trigger) -> Option<PendingLoad> {
        let props = self.props.as_ref()?;
        let selection = props.selection.as_ref()?;

        let (purpose, filter, encoding) = match trigger {
            Trigger::Mount | Trigger::SelectionChanged => {
                let encoding = self
                    .preferences
                    .field_encoding(
                        &props.index.index_path,
                        &selection.field,
                        &self.config.preference_category,
                    )
                    .unwrap_or_else(|| self.config.default_encoding.clone());
                (LoadPurpose::Selection, self.filter.clone(), encoding)
            }
            Trigger::EncodingRequested(candidate) => (
                LoadPurpose::Encoding {
                    candidate: candidate.clone(),
                },
                self.filter.clone(),
                candidate,
            ),
            Trigger::FilterEdited(filter) => (
                LoadPurpose::Filter {
                    filter: filter.clone(),
                },
                filter,
                self.encoding.clone(),
            ),
        };

        let request = LoadRequest {
            segment: selection.segment.clone(),
            field: selection.field.clone(),
            filter: filter.as_str().to_string(),
            encoding,
        };
        Some(
            self.controller
                .issue(purpose, request, props.index.index_path.clone()),
        )
    }

    /// Applies the backend's answer to `load`.
    pub fn complete(&mut self, load: PendingLoad, outcome: Result<LoadedDocValues>) -> LoadOutcome {
        if !self.controller.admit(&load) {
            return LoadOutcome::Discarded;
        }
        match outcome {
            Ok(loaded) => self.apply_loaded(load, loaded),
            Err(e) => self.apply_failure(&load, e.to_string()),
        }
    }

    fn apply_loaded(&mut self, load: PendingLoad, loaded: LoadedDocValues) -> LoadOutcome {
        let seq = load.seq();
        match load.purpose {
            LoadPurpose::Selection => {}
            LoadPurpose::Encoding { candidate } => {
                let scope = PreferenceScope {
                    index_path: &load.index_path,
                    field: &load.request.field,
                    category: &self.config.preference_category,
                };
                if let Err(e) =
                    settle_encoding(&mut self.preferences, scope, &candidate, &loaded.encoding)
                {
                    self.report(&e);
                }
            }
            LoadPurpose::Filter { filter } => self.filter = filter,
        }
        debug!(
            "applied doc values load #{seq} ({} in '{}')",
            loaded.values.kind,
            loaded.encoding
        );
        self.encoding = loaded.encoding;
        self.result = Some(loaded.values);
        self.kind_reported = false;
        LoadOutcome::Applied
    }

    fn apply_failure(&mut self, load: &PendingLoad, message: String) -> LoadOutcome {
        match InspectError::from_backend_message(&load.request.field, message) {
            InspectError::NoDocValuesForField { field } => {
                debug!("field '{field}' has no doc values");
                self.result = Some(DocValuesResult::none());
                self.kind_reported = false;
                LoadOutcome::NoDocValues
            }
            failure => {
                warn!(
                    "doc values load #{} for '{}' failed: {failure}",
                    load.seq(),
                    load.request.field
                );
                self.report(&failure);
                LoadOutcome::Failed(failure)
            }
        }
    }

    fn report(&mut self, failure: &InspectError) {
        if let Some(notice) = failure.notice() {
            self.notices.notify(notice);
        }
    }

    /// Derives the display from the committed state.
    ///
    /// An unknown value kind leaves every row's text empty and raises a fatal
    /// notice once per applied result, however often it is rendered.
    pub fn render(&mut self) -> InspectorView {
        let Some(props) = &self.props else {
            return InspectorView::Empty;
        };
        let (Some(selection), Some(result)) = (&props.selection, &self.result) else {
            return InspectorView::Empty;
        };
        if result.is_none() {
            return InspectorView::NoDocValues {
                field: selection.field.clone(),
            };
        }

        let ids = document_ids(
            &self.filter,
            result,
            props.index.num_docs,
            self.parser.as_ref(),
        );
        let rows = match validate_kind(&result.kind) {
            Ok(()) => ids
                .into_iter()
                .map(|doc_id| {
                    let text = format_doc_value(&doc_id, result.value(&doc_id), &result.kind)
                        .unwrap_or_default();
                    DocRow { doc_id, text }
                })
                .collect(),
            Err(e) => {
                if !self.kind_reported {
                    if let Some(notice) = e.notice() {
                        self.notices.notify(notice);
                    }
                    self.kind_reported = true;
                }
                ids.into_iter()
                    .map(|doc_id| DocRow {
                        doc_id,
                        text: String::new(),
                    })
                    .collect()
            }
        };

        InspectorView::Values(ValuesView {
            field: selection.field.clone(),
            kind: result.kind.clone(),
            filter: self.filter.to_string(),
            placeholder: FILTER_PLACEHOLDER,
            encoding: encoding_control(&result.kind, &self.encoding),
            rows,
        })
    }
}
