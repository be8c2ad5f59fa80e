//! Top-level token select controller.
//!
//! [`TokenSelect`] owns the working tree, the selection, and the derived
//! indeterminate set. Each handler replaces the sets with freshly computed
//! ones, so a renderer holding the previous sets never sees a half update.
//!
//! Async work is split in three steps so that a host can keep feeding
//! synchronous events while fetches are in flight:
//!
//! ```ignore
//! if let ExpandStart::Fetch(ticket) = select.begin_expand("fruit") {
//!     let loader = select.loader().clone();
//!     let loaded = loader.fetch_children(ticket).await;
//!     select.finish_expand(loaded)?;
//! }
//! ```
//!
//! [`expand`](TokenSelect::expand) and [`search`](TokenSelect::search) run
//! the three steps back to back for hosts that don't need interleaving.

mod view;

pub use view::*;

use std::sync::Arc;

use crate::config::TokenSelectConfig;
use crate::error::Error;
use crate::loader::LazyLoader;
use crate::loader::LoadState;
use crate::loader::LoadTicket;
use crate::loader::Loaded;
use crate::loader::Outcome;
use crate::loader::RequestTracker;
use crate::loader::SearchTicket;
use crate::loader::Searched;
use crate::model::Item;
use crate::model::Node;
use crate::model::Token;
use crate::model::find_token_by_label;
use crate::model::nodes_from_items;
use crate::model::nodes_from_trees;
use crate::model::token_ids;
use crate::search::partition;
use crate::search::rank;
use crate::selection::CheckState;
use crate::selection::IdSet;
use crate::selection::check;
use crate::selection::check_all_state;
use crate::selection::compute_indeterminate;
use crate::selection::count_selected;
use crate::selection::node_state;
use crate::selection::project_tokens;
use crate::selection::reconcile_on_load;
use crate::selection::toggle_select_all;
use crate::selection::uncheck;
use crate::source::ItemSource;
use crate::tree::TreeStore;

/// Callback receiving the committed tokens.
pub type ChangeListener = Box<dyn FnMut(&[Token]) + Send>;

/// What [`TokenSelect::begin_expand`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandStart {
    /// Children must be fetched with this ticket.
    Fetch(LoadTicket),
    /// Nothing to fetch.
    Skip(ExpandOutcome),
}

/// Result of an expand request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Children were fetched and merged.
    Loaded,
    /// The fetch completed after being superseded; its result was dropped.
    Stale,
    /// Children were already loaded (possibly empty); only the view toggles.
    AlreadyLoaded,
    /// The node is a leaf.
    NotExpandable,
    /// The id is not in the current tree.
    NotFound,
}

/// Hierarchical multi-select state machine.
///
/// # Example
///
/// ```ignore
/// let source = Arc::new(InMemorySource::from_json(CATALOG)?);
/// let mut select = TokenSelect::new(source)
///     .on_change(|tokens| println!("{} tokens", tokens.len()));
///
/// select.init(&[]).await?;
/// select.expand("fruit").await?;
/// select.select("apple");
/// let tokens = select.commit();
/// ```
pub struct TokenSelect<S: ItemSource + ?Sized> {
    loader: LazyLoader<S>,
    config: TokenSelectConfig,
    tree: TreeStore,
    /// Browse tree parked while search results are shown.
    browse: Option<Vec<Node>>,
    selected: IdSet,
    indeterminate: IdSet,
    input: String,
    query: Option<String>,
    open: bool,
    requests: RequestTracker,
    on_change: Option<ChangeListener>,
}

impl<S: ItemSource + ?Sized> TokenSelect<S> {
    /// Create a controller with default settings.
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, TokenSelectConfig::default())
    }

    /// Create a controller with the given settings.
    pub fn with_config(source: Arc<S>, config: TokenSelectConfig) -> Self {
        Self {
            loader: LazyLoader::new(source, &config),
            tree: TreeStore::with_cache_config(config.cache.clone()),
            config,
            browse: None,
            selected: IdSet::new(),
            indeterminate: IdSet::new(),
            input: String::new(),
            query: None,
            open: false,
            requests: RequestTracker::new(),
            on_change: None,
        }
    }

    /// Register the listener fired on commit and token removal.
    pub fn on_change(mut self, listener: impl FnMut(&[Token]) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Fetch the top-level items and seed the selection from `tokens`.
    pub async fn init(&mut self, tokens: &[Token]) -> Result<(), Error> {
        let roots = self.loader.fetch_roots().await?;
        self.install_roots(roots, tokens);
        Ok(())
    }

    /// Install already fetched top-level items and seed the selection.
    ///
    /// Any in-flight expand or search becomes stale.
    pub fn install_roots(&mut self, items: Vec<Item>, tokens: &[Token]) {
        log::debug!("installing {} root items", items.len());
        self.requests.invalidate_loads();
        self.requests.invalidate_search();
        self.browse = None;
        self.query = None;
        self.tree.replace(nodes_from_items(items));
        self.set_selection(token_ids(tokens));
    }

    /// Open the dropdown, resetting the working selection to `tokens`.
    pub fn open(&mut self, tokens: &[Token]) {
        self.open = true;
        self.set_selection(token_ids(tokens));
    }

    /// Close the dropdown without committing.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Check a node and its loaded subtree.
    pub fn select(&mut self, id: &str) {
        let next = check(&self.tree, &self.selected, id);
        self.set_selection(next);
    }

    /// Uncheck a node, its loaded subtree, and its ancestors.
    pub fn unselect(&mut self, id: &str) {
        let next = uncheck(self.tree.roots(), &self.selected, id);
        self.set_selection(next);
    }

    /// Flip a node's checkbox.
    pub fn toggle(&mut self, id: &str) {
        if self.selected.contains(id) {
            self.unselect(id);
        } else {
            self.select(id);
        }
    }

    /// Flip the "select all" checkbox.
    pub fn toggle_all(&mut self) {
        let next = toggle_select_all(&self.tree, &self.selected);
        self.set_selection(next);
    }

    // -------------------------------------------------------------------------
    // Lazy loading
    // -------------------------------------------------------------------------

    /// Decide whether expanding `id` needs a fetch and issue a ticket if so.
    ///
    /// Only a parent whose children were never fetched is fetched; a parent
    /// fetched as empty just toggles in the view.
    pub fn begin_expand(&mut self, id: &str) -> ExpandStart {
        let Some(node) = self.tree.find_by_id(id) else {
            return ExpandStart::Skip(ExpandOutcome::NotFound);
        };

        if !node.is_parent() {
            ExpandStart::Skip(ExpandOutcome::NotExpandable)
        } else if !node.needs_fetch() {
            ExpandStart::Skip(ExpandOutcome::AlreadyLoaded)
        } else {
            ExpandStart::Fetch(self.requests.issue_load(id))
        }
    }

    /// Apply fetched children: merge them and carry a checked parent's state
    /// onto them.
    ///
    /// A superseded ticket yields [`ExpandOutcome::Stale`] and changes
    /// nothing. A failed fetch marks the node failed and returns the error.
    pub fn finish_expand(&mut self, loaded: Loaded) -> Result<ExpandOutcome, Error> {
        let Loaded { ticket, result } = loaded;

        let failure = result.as_ref().err().map(|e| e.to_string());
        if !self.requests.settle_load(&ticket, failure) {
            log::debug!("dropping stale children of {} (gen {})", ticket.id, ticket.generation);
            return Ok(ExpandOutcome::Stale);
        }

        let items = result?;
        log::debug!("merging {} children under {}", items.len(), ticket.id);
        self.tree
            .merge_children(&ticket.id, nodes_from_items(items.iter().cloned()));
        let next = reconcile_on_load(&self.selected, &items, &ticket.id);
        self.set_selection(next);
        Ok(ExpandOutcome::Loaded)
    }

    /// Expand a node, fetching its children if needed.
    pub async fn expand(&mut self, id: &str) -> Result<ExpandOutcome, Error> {
        match self.begin_expand(id) {
            ExpandStart::Skip(outcome) => Ok(outcome),
            ExpandStart::Fetch(ticket) => {
                let loaded = self.loader.fetch_children(ticket).await;
                self.finish_expand(loaded)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Record new input text and issue a search ticket when it is long enough.
    ///
    /// Blank input drops any pending search and brings back the browse tree.
    pub fn set_input(&mut self, value: &str) -> Option<SearchTicket> {
        self.input = value.to_string();
        let query = value.trim();

        if query.is_empty() {
            self.requests.invalidate_search();
            self.restore_browse();
            return None;
        }
        if query.chars().count() <= self.config.min_query_len {
            return None;
        }
        Some(self.requests.issue_search(query))
    }

    /// Apply search results as the working tree.
    ///
    /// Empty results keep the current tree. Outstanding expands are dropped
    /// because their nodes belong to the replaced tree.
    pub fn finish_search(&mut self, searched: Searched) -> Result<Outcome, Error> {
        let Searched { ticket, result } = searched;

        if !self.requests.settle_search(&ticket) {
            log::debug!("dropping stale search {:?} (gen {})", ticket.query, ticket.generation);
            return Ok(Outcome::Stale);
        }

        let trees = result?;
        if trees.is_empty() {
            log::debug!("search {:?} found nothing, keeping current tree", ticket.query);
            return Ok(Outcome::Applied);
        }

        if self.browse.is_none() {
            self.browse = Some(self.tree.roots().to_vec());
        }
        self.requests.invalidate_loads();
        self.tree.replace(nodes_from_trees(trees));
        self.query = Some(ticket.query);
        self.refresh();
        Ok(Outcome::Applied)
    }

    /// Record input and, if it qualifies, run the search to completion.
    ///
    /// Returns `None` when no search was issued.
    pub async fn search(&mut self, value: &str) -> Result<Option<Outcome>, Error> {
        let Some(ticket) = self.set_input(value) else {
            return Ok(None);
        };
        let searched = self.loader.search(ticket).await;
        self.finish_search(searched).map(Some)
    }

    fn restore_browse(&mut self) {
        self.query = None;
        if let Some(roots) = self.browse.take() {
            log::debug!("restoring browse tree");
            self.requests.invalidate_loads();
            self.tree.replace(roots);
            self.refresh();
        }
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Commit the working selection: fire the listener, clear the input and
    /// close the dropdown.
    pub fn commit(&mut self) -> Vec<Token> {
        let tokens = project_tokens(self.tree.roots(), &self.selected);
        log::debug!("committing {} tokens", tokens.len());
        self.emit(&tokens);
        self.set_input("");
        self.open = false;
        tokens
    }

    /// Discard the input and close the dropdown.
    pub fn cancel(&mut self) {
        self.set_input("");
        self.open = false;
    }

    /// Remove a token from the host's list and uncheck it.
    ///
    /// Fires the listener with the remaining tokens, which are also returned.
    pub fn remove_token(&mut self, tokens: &[Token], id: &str) -> Vec<Token> {
        self.unselect(id);
        let remaining: Vec<Token> = tokens.iter().filter(|t| t.value != id).cloned().collect();
        self.emit(&remaining);
        remaining
    }

    /// Like [`remove_token`](Self::remove_token), addressing the token by its label.
    pub fn remove_token_by_label(&mut self, tokens: &[Token], label: &str) -> Option<Vec<Token>> {
        let id = find_token_by_label(tokens, label)?.value.clone();
        Some(self.remove_token(tokens, &id))
    }

    fn emit(&mut self, tokens: &[Token]) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(tokens);
        }
    }

    fn set_selection(&mut self, selected: IdSet) {
        self.selected = selected;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.indeterminate = compute_indeterminate(self.tree.roots(), &self.selected);
        log::trace!(
            "selection: {} checked, {} indeterminate",
            self.selected.len(),
            self.indeterminate.len()
        );
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn loader(&self) -> &LazyLoader<S> {
        &self.loader
    }

    pub fn config(&self) -> &TokenSelectConfig {
        &self.config
    }

    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    pub fn selected(&self) -> &IdSet {
        &self.selected
    }

    pub fn indeterminate(&self) -> &IdSet {
        &self.indeterminate
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The query whose results are currently shown.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Footer count of selected entries.
    pub fn selected_count(&self) -> usize {
        count_selected(self.tree.roots(), &self.selected)
    }

    /// Tokens the current selection would commit.
    pub fn pending_tokens(&self) -> Vec<Token> {
        project_tokens(self.tree.roots(), &self.selected)
    }

    /// State of the "select all" checkbox.
    pub fn check_all_state(&self) -> CheckState {
        check_all_state(self.tree.roots(), &self.selected)
    }

    /// State of a node's checkbox.
    pub fn node_state(&self, id: &str) -> CheckState {
        node_state(id, &self.selected, &self.indeterminate)
    }

    /// Load state of a node's expand control.
    pub fn load_state(&self, id: &str) -> LoadState {
        self.requests.state(id)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        self.tree.find_by_label(label)
    }

    /// What the dropdown should list right now.
    pub fn view(&self) -> View {
        match &self.query {
            Some(query) => View::Search {
                query: query.clone(),
                results: partition(&rank(self.tree.roots(), query)),
            },
            None => View::Tree(self.tree.roots().to_vec()),
        }
    }
}
