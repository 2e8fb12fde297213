//! An in-memory filesystem.
//!
//! Entries are keyed by their lower-cased regular path, so lookups are
//! case-insensitive while the names keep the case they were created with.
//! Every native call is recorded, which lets callers assert on exactly which
//! primitives an operation used.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::native::{
    codes, fill_name_buffer, AccessControl, Capabilities, EntryKind, NameForm, NameQuery,
    NativeError, NativeFileSystem, NativeSecurity, Transaction,
};
use crate::path::prefix::{self, PrefixKind, DIRECTORY_SEPARATOR};
use crate::path::regular::regular_form;
use crate::path::{get_long_path, is_long_path};

/// A native call recorded by [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    /// An existence probe.
    EntryKind {
        /// The probed path.
        path: String,
        /// The transaction the probe was bound to.
        transaction: Option<Transaction>,
    },
    /// A plain directory creation.
    CreateDirectory {
        /// The created path.
        path: String,
    },
    /// A directory creation copying a template.
    CreateFromTemplate {
        /// The template directory.
        template: String,
        /// The created path.
        path: String,
    },
    /// A transacted directory creation.
    CreateTransacted {
        /// The template directory, if any.
        template: Option<String>,
        /// The created path.
        path: String,
        /// The transaction the creation was bound to.
        transaction: Transaction,
    },
    /// A compression toggle.
    SetCompression {
        /// The target path.
        path: String,
        /// The requested state.
        enabled: bool,
    },
    /// A short- or long-name query.
    PathName {
        /// The requested form.
        form: NameForm,
        /// The queried path.
        path: String,
        /// The capacity of the buffer the caller provided.
        capacity: usize,
    },
}

impl NativeCall {
    /// Returns `true` for the directory-creation primitives.
    #[must_use]
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Self::CreateDirectory { .. } | Self::CreateFromTemplate { .. } | Self::CreateTransacted { .. }
        )
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: EntryKind,
    short_name: Option<String>,
    compressed: bool,
    security: Option<AccessControl>,
    transaction: Option<Transaction>,
}

impl Node {
    fn new(kind: EntryKind) -> Self {
        Self {
            name: String::new(),
            kind,
            short_name: None,
            compressed: false,
            security: None,
            transaction: None,
        }
    }
}

/// A path split into its root and components.
#[derive(Debug)]
struct Location {
    root_key: String,
    root: String,
    components: Vec<String>,
    network: bool,
}

impl Location {
    fn parse(path: &str) -> Option<Self> {
        let regular = regular_form(path);
        let root_len = prefix::root_length(&regular);
        if root_len == 0 {
            return None;
        }
        let root = regular[..root_len].trim_end_matches(prefix::is_separator).to_string();
        let components = regular[root_len..]
            .split(prefix::is_separator)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self {
            root_key: root.to_lowercase(),
            network: PrefixKind::of(&regular) == PrefixKind::Unc,
            root,
            components,
        })
    }

    fn literal_key(&self) -> String {
        self.components
            .iter()
            .fold(self.root_key.clone(), |key, c| child_key(&key, c))
    }
}

fn child_key(parent: &str, name: &str) -> String {
    format!("{parent}{DIRECTORY_SEPARATOR}{}", name.to_lowercase())
}

fn parent_key(key: &str) -> &str {
    key.rfind(DIRECTORY_SEPARATOR).map_or(key, |index| &key[..index])
}

fn root_path(root: &str) -> String {
    if PrefixKind::of(root) == PrefixKind::Unc {
        root.to_string()
    } else {
        format!("{root}{DIRECTORY_SEPARATOR}")
    }
}

fn invalid_name() -> NativeError {
    NativeError::new(codes::ERROR_INVALID_NAME)
}

#[derive(Debug, Default)]
struct State {
    roots: BTreeMap<String, String>,
    nodes: BTreeMap<String, Node>,
    calls: Vec<NativeCall>,
    create_failures: HashMap<String, NativeError>,
    compression_failures: HashMap<String, NativeError>,
    concurrent: HashMap<String, EntryKind>,
}

impl State {
    fn check_root(&self, location: &Location) -> Result<(), NativeError> {
        if self.roots.contains_key(&location.root_key) {
            Ok(())
        } else if location.network {
            Err(NativeError::new(codes::ERROR_BAD_NET_NAME))
        } else {
            Err(NativeError::new(codes::ERROR_PATH_NOT_FOUND))
        }
    }

    /// Resolves the first `depth` components, following short-name aliases.
    fn resolve(&self, location: &Location, depth: usize) -> Option<String> {
        let mut current = location.root_key.clone();
        for component in &location.components[..depth] {
            if self.kind_of(location, &current) == EntryKind::File {
                return None;
            }
            let candidate = child_key(&current, component);
            if self.nodes.contains_key(&candidate) {
                current = candidate;
                continue;
            }
            current = self
                .nodes
                .iter()
                .find(|(key, node)| {
                    parent_key(key) == current
                        && node
                            .short_name
                            .as_deref()
                            .is_some_and(|short| short.eq_ignore_ascii_case(component))
                })
                .map(|(key, _)| key.clone())?;
        }
        Some(current)
    }

    fn kind_of(&self, location: &Location, key: &str) -> EntryKind {
        if key == location.root_key {
            return EntryKind::Directory;
        }
        self.nodes.get(key).map_or(EntryKind::Directory, |node| node.kind)
    }

    fn display(&self, location: &Location, key: &str) -> String {
        self.nodes
            .get(key)
            .map_or_else(|| location.root.clone(), |node| node.name.clone())
    }

    fn insert(&mut self, location: &Location, parent: &str, name: &str, mut node: Node) -> String {
        node.name = format!("{}{DIRECTORY_SEPARATOR}{name}", self.display(location, parent));
        let key = child_key(parent, name);
        log::trace!("memory: inserted {:?} '{}'", node.kind, node.name);
        self.nodes.insert(key.clone(), node);
        key
    }

    fn remove_tree(&mut self, key: &str) -> usize {
        let nested = format!("{key}{DIRECTORY_SEPARATOR}");
        let before = self.nodes.len();
        self.nodes.retain(|k, _| k != key && !k.starts_with(&nested));
        before - self.nodes.len()
    }

    fn long_name(&self, location: &Location, key: &str) -> String {
        match self.nodes.get(key) {
            Some(node) => node.name.clone(),
            None => root_path(&location.root),
        }
    }

    fn short_name(&self, location: &Location, key: &str) -> String {
        let mut parts = Vec::new();
        let mut current = key;
        while current != location.root_key {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            let own = node
                .name
                .rsplit(DIRECTORY_SEPARATOR)
                .next()
                .unwrap_or_default();
            parts.push(node.short_name.clone().unwrap_or_else(|| own.to_string()));
            current = parent_key(current);
        }
        if parts.is_empty() {
            return root_path(&location.root);
        }
        parts.reverse();
        format!("{}{DIRECTORY_SEPARATOR}{}", location.root, parts.join("\\"))
    }
}

/// An in-memory, case-insensitive filesystem.
///
/// # Examples
///
/// ```
/// use longpath::native::{EntryKind, MemoryFileSystem, NativeFileSystem};
///
/// let fs = MemoryFileSystem::new().with_volume('C');
/// fs.add_directory(r"C:\Program Files").unwrap();
/// fs.set_short_name(r"C:\Program Files", "PROGRA~1").unwrap();
///
/// assert_eq!(
///     fs.entry_kind(r"\\?\C:\PROGRA~1", None).unwrap(),
///     Some(EntryKind::Directory)
/// );
/// ```
#[derive(Debug)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    capabilities: Capabilities,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self {
            state: Mutex::default(),
            capabilities: Capabilities {
                transactions: false,
                templates: true,
            },
        }
    }
}

impl MemoryFileSystem {
    /// An empty filesystem without any volumes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the volume `letter:\`.
    #[must_use]
    pub fn with_volume(self, letter: char) -> Self {
        self.with_root(&format!("{}:\\", letter.to_ascii_uppercase()))
    }

    /// Adds the network share `\\server\share`.
    #[must_use]
    pub fn with_share(self, server: &str, share: &str) -> Self {
        self.with_root(&format!(r"\\{server}\{share}"))
    }

    /// Adds an arbitrary root, such as `\\?\Volume{GUID}\`.
    #[must_use]
    pub fn with_root(self, root: &str) -> Self {
        if let Some(location) = Location::parse(root) {
            self.state().roots.insert(location.root_key, location.root);
        }
        self
    }

    /// Enables or disables transaction support.
    #[must_use]
    pub fn with_transactions(mut self, enabled: bool) -> Self {
        self.capabilities.transactions = enabled;
        self
    }

    /// Enables or disables template support.
    #[must_use]
    pub fn with_templates(mut self, enabled: bool) -> Self {
        self.capabilities.templates = enabled;
        self
    }

    /// Creates a directory and any missing parents, without recording calls.
    ///
    /// # Errors
    ///
    /// Returns a native error if the root is unknown or a parent is a file.
    pub fn add_directory(&self, path: &str) -> Result<(), NativeError> {
        self.add(path, EntryKind::Directory)
    }

    /// Creates a file and any missing parents, without recording calls.
    ///
    /// # Errors
    ///
    /// Returns a native error if the root is unknown or a parent is a file.
    pub fn add_file(&self, path: &str) -> Result<(), NativeError> {
        self.add(path, EntryKind::File)
    }

    fn add(&self, path: &str, kind: EntryKind) -> Result<(), NativeError> {
        let location = Location::parse(path).ok_or_else(invalid_name)?;
        let mut state = self.state();
        state.check_root(&location)?;

        let mut parent = location.root_key.clone();
        for (index, component) in location.components.iter().enumerate() {
            if let Some(existing) = state.resolve(&location, index + 1) {
                parent = existing;
                continue;
            }
            if state.kind_of(&location, &parent) == EntryKind::File {
                return Err(NativeError::new(codes::ERROR_PATH_NOT_FOUND));
            }
            let last = index + 1 == location.components.len();
            let node = Node::new(if last { kind } else { EntryKind::Directory });
            parent = state.insert(&location, &parent, component, node);
        }
        Ok(())
    }

    /// Gives an existing entry an 8.3 alias.
    ///
    /// # Errors
    ///
    /// Returns `ERROR_FILE_NOT_FOUND` if the entry does not exist.
    pub fn set_short_name(&self, path: &str, short_name: &str) -> Result<(), NativeError> {
        let location = Location::parse(path).ok_or_else(invalid_name)?;
        let mut state = self.state();
        let key = state
            .resolve(&location, location.components.len())
            .ok_or(NativeError::new(codes::ERROR_FILE_NOT_FOUND))?;
        let node = state
            .nodes
            .get_mut(&key)
            .ok_or(NativeError::new(codes::ERROR_INVALID_NAME))?;
        node.short_name = Some(short_name.to_string());
        Ok(())
    }

    /// Removes an entry and everything below it.
    pub fn remove(&self, path: &str) {
        let Some(location) = Location::parse(path) else {
            return;
        };
        let mut state = self.state();
        if let Some(key) = state.resolve(&location, location.components.len()) {
            state.remove_tree(&key);
        }
    }

    /// Makes every creation of `path` fail with `err`.
    pub fn fail_creation(&self, path: &str, err: NativeError) {
        let key = Self::literal_key(path);
        self.state().create_failures.insert(key, err);
    }

    /// Makes every compression toggle on `path` fail with `err`.
    pub fn fail_compression(&self, path: &str, err: NativeError) {
        let key = Self::literal_key(path);
        self.state().compression_failures.insert(key, err);
    }

    /// Simulates another process creating `path` as `kind` right before the
    /// next creation call for it, which then reports "already exists".
    pub fn create_concurrently(&self, path: &str, kind: EntryKind) {
        let key = Self::literal_key(path);
        self.state().concurrent.insert(key, kind);
    }

    /// Removes every entry created under `transaction`, returning how many
    /// entries were removed.
    pub fn rollback(&self, transaction: Transaction) -> usize {
        let mut state = self.state();
        let keys: Vec<String> = state
            .nodes
            .iter()
            .filter(|(_, node)| node.transaction == Some(transaction))
            .map(|(key, _)| key.clone())
            .collect();
        keys.iter().map(|key| state.remove_tree(key)).sum()
    }

    /// Detaches every entry from `transaction`.
    pub fn commit(&self, transaction: Transaction) {
        for node in self.state().nodes.values_mut() {
            if node.transaction == Some(transaction) {
                node.transaction = None;
            }
        }
    }

    /// The kind of the entry at `path`, without recording a call.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<EntryKind> {
        let location = Location::parse(path)?;
        let state = self.state();
        state.check_root(&location).ok()?;
        let key = state.resolve(&location, location.components.len())?;
        Some(state.kind_of(&location, &key))
    }

    /// Returns `true` if `path` is an existing directory.
    #[must_use]
    pub fn is_directory(&self, path: &str) -> bool {
        self.entry(path) == Some(EntryKind::Directory)
    }

    /// Returns `true` if `path` is an existing file.
    #[must_use]
    pub fn is_file(&self, path: &str) -> bool {
        self.entry(path) == Some(EntryKind::File)
    }

    /// Returns `true` if `path` exists and is compressed.
    #[must_use]
    pub fn is_compressed(&self, path: &str) -> bool {
        self.with_node(path, |node| node.compressed).unwrap_or(false)
    }

    /// The access control `path` was created with.
    #[must_use]
    pub fn security_of(&self, path: &str) -> Option<AccessControl> {
        self.with_node(path, |node| node.security.clone()).flatten()
    }

    /// The transaction `path` was created under, until it is committed.
    #[must_use]
    pub fn transaction_of(&self, path: &str) -> Option<Transaction> {
        self.with_node(path, |node| node.transaction).flatten()
    }

    /// Every native call recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state().calls.clone()
    }

    /// The number of directory-creation calls recorded so far.
    #[must_use]
    pub fn creation_calls(&self) -> usize {
        self.state().calls.iter().filter(|call| call.is_creation()).count()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn with_node<T>(&self, path: &str, f: impl FnOnce(&Node) -> T) -> Option<T> {
        let location = Location::parse(path)?;
        let state = self.state();
        let key = state.resolve(&location, location.components.len())?;
        state.nodes.get(&key).map(f)
    }

    fn literal_key(path: &str) -> String {
        Location::parse(path).map_or_else(|| path.to_lowercase(), |location| location.literal_key())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create(
        &self,
        call: NativeCall,
        template: Option<&str>,
        path: &str,
        security: Option<&NativeSecurity>,
        transaction: Option<Transaction>,
    ) -> Result<(), NativeError> {
        let mut state = self.state();
        state.calls.push(call);

        let location = Location::parse(path).ok_or_else(invalid_name)?;
        let literal = location.literal_key();
        if let Some(err) = state.create_failures.get(&literal) {
            return Err(*err);
        }
        state.check_root(&location)?;

        let Some((name, parents)) = location.components.split_last() else {
            return Err(NativeError::new(codes::ERROR_ALREADY_EXISTS));
        };

        if let Some(kind) = state.concurrent.remove(&literal) {
            if let Some(parent) = state.resolve(&location, parents.len()) {
                state.insert(&location, &parent, name, Node::new(kind));
            }
            return Err(NativeError::new(codes::ERROR_ALREADY_EXISTS));
        }

        let parent = state
            .resolve(&location, parents.len())
            .ok_or(NativeError::new(codes::ERROR_PATH_NOT_FOUND))?;
        if state.kind_of(&location, &parent) == EntryKind::File {
            return Err(NativeError::new(codes::ERROR_PATH_NOT_FOUND));
        }
        if state.resolve(&location, location.components.len()).is_some() {
            return Err(NativeError::new(codes::ERROR_ALREADY_EXISTS));
        }

        let mut node = Node::new(EntryKind::Directory);
        if let Some(template) = template {
            let template_location = Location::parse(template).ok_or_else(invalid_name)?;
            let template_key = state
                .resolve(&template_location, template_location.components.len())
                .filter(|key| state.kind_of(&template_location, key) == EntryKind::Directory)
                .ok_or(NativeError::new(codes::ERROR_PATH_NOT_FOUND))?;
            if let Some(source) = state.nodes.get(&template_key) {
                node.compressed = source.compressed;
                node.security.clone_from(&source.security);
            }
        }
        if let Some(security) = security {
            let mut access = AccessControl::new();
            if let Some(sddl) = security.sddl() {
                access = access.with_sddl(sddl);
            }
            if let Some(mode) = security.mode() {
                access = access.with_mode(mode);
            }
            node.security = Some(access);
        }
        node.transaction = transaction;

        state.insert(&location, &parent, name, node);
        Ok(())
    }

    fn transaction_supported(&self, transaction: Option<&Transaction>) -> Result<(), NativeError> {
        if transaction.is_some() && !self.capabilities.transactions {
            return Err(NativeError::new(codes::ERROR_NOT_SUPPORTED));
        }
        Ok(())
    }
}

impl NativeFileSystem for MemoryFileSystem {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn entry_kind(
        &self,
        path: &str,
        transaction: Option<&Transaction>,
    ) -> Result<Option<EntryKind>, NativeError> {
        let mut state = self.state();
        state.calls.push(NativeCall::EntryKind {
            path: path.to_string(),
            transaction: transaction.copied(),
        });
        self.transaction_supported(transaction)?;

        let location = Location::parse(path).ok_or_else(invalid_name)?;
        state.check_root(&location)?;
        let key = state.resolve(&location, location.components.len());
        Ok(key.map(|key| state.kind_of(&location, &key)))
    }

    fn create_directory(
        &self,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        let call = NativeCall::CreateDirectory {
            path: path.to_string(),
        };
        self.create(call, None, path, security, None)
    }

    fn create_directory_from_template(
        &self,
        template: &str,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        let call = NativeCall::CreateFromTemplate {
            template: template.to_string(),
            path: path.to_string(),
        };
        if !self.capabilities.templates {
            self.state().calls.push(call);
            return Err(NativeError::new(codes::ERROR_NOT_SUPPORTED));
        }
        self.create(call, Some(template), path, security, None)
    }

    fn create_directory_transacted(
        &self,
        template: Option<&str>,
        path: &str,
        security: Option<&NativeSecurity>,
        transaction: &Transaction,
    ) -> Result<(), NativeError> {
        let call = NativeCall::CreateTransacted {
            template: template.map(str::to_string),
            path: path.to_string(),
            transaction: *transaction,
        };
        if !self.capabilities.transactions {
            self.state().calls.push(call);
            return Err(NativeError::new(codes::ERROR_NOT_SUPPORTED));
        }
        self.create(call, template, path, security, Some(*transaction))
    }

    fn set_compression(
        &self,
        path: &str,
        enabled: bool,
        transaction: Option<&Transaction>,
    ) -> Result<(), NativeError> {
        let mut state = self.state();
        state.calls.push(NativeCall::SetCompression {
            path: path.to_string(),
            enabled,
        });
        self.transaction_supported(transaction)?;

        let location = Location::parse(path).ok_or_else(invalid_name)?;
        if let Some(err) = state.compression_failures.get(&location.literal_key()) {
            return Err(*err);
        }
        let key = state
            .resolve(&location, location.components.len())
            .ok_or(NativeError::new(codes::ERROR_FILE_NOT_FOUND))?;
        let node = state
            .nodes
            .get_mut(&key)
            .ok_or(NativeError::new(codes::ERROR_ACCESS_DENIED))?;
        node.compressed = enabled;
        Ok(())
    }

    fn path_name(
        &self,
        form: NameForm,
        path: &str,
        buffer: &mut [u16],
        transaction: Option<&Transaction>,
    ) -> Result<NameQuery, NativeError> {
        let mut state = self.state();
        state.calls.push(NativeCall::PathName {
            form,
            path: path.to_string(),
            capacity: buffer.len(),
        });
        self.transaction_supported(transaction)?;

        let location = Location::parse(path).ok_or_else(invalid_name)?;
        state.check_root(&location)?;
        let key = state
            .resolve(&location, location.components.len())
            .ok_or(NativeError::new(codes::ERROR_FILE_NOT_FOUND))?;
        let name = match form {
            NameForm::Long => state.long_name(&location, &key),
            NameForm::Short => state.short_name(&location, &key),
        };
        let name = if is_long_path(path) {
            get_long_path(&name).unwrap_or(name)
        } else {
            name
        };
        Ok(fill_name_buffer(&name, buffer))
    }
}
