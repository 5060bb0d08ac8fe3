use std::collections::BTreeMap;

use serde::Serialize;

use super::schema::{FormSchema, ListSchema};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormStateError {
    #[error("form has no list named '{0}'")]
    UnknownList(String),
    #[error("{list} has no item at position {index}")]
    ItemOutOfRange { list: String, index: usize },
    #[error("{list} items have no attribute '{attribute}'")]
    UnknownAttribute { list: String, attribute: String },
}

/// One entry of a collection. No identity beyond its position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListRecord {
    values: BTreeMap<String, String>,
}

impl ListRecord {
    fn blank(schema: &ListSchema) -> Self {
        let values = schema
            .attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.default_value()))
            .collect();
        Self { values }
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }
}

/// Ordered collection that never drops below one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordList {
    #[serde(skip)]
    template: ListSchema,
    items: Vec<ListRecord>,
}

impl RecordList {
    fn new(template: &ListSchema) -> Self {
        Self {
            items: vec![ListRecord::blank(template)],
            template: template.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListRecord] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ListRecord> {
        self.items.get(index)
    }

    fn push_blank(&mut self) -> usize {
        self.items.push(ListRecord::blank(&self.template));
        self.items.len() - 1
    }

    fn remove(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }
}

/// Form State Container: scalar fields plus named record collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteFormState {
    fields: BTreeMap<String, String>,
    lists: BTreeMap<String, RecordList>,
    #[serde(skip)]
    defaults: BTreeMap<String, String>,
}

impl QuoteFormState {
    /// Default values for every field and one blank record per collection.
    pub fn for_schema(schema: &FormSchema) -> Self {
        let defaults: BTreeMap<String, String> = schema
            .fields()
            .map(|field| (field.name.clone(), field.default_value()))
            .collect();
        let lists = schema
            .lists
            .iter()
            .map(|list| (list.name.clone(), RecordList::new(list)))
            .collect();

        Self {
            fields: defaults.clone(),
            lists,
            defaults,
        }
    }

    /// Set a scalar field. Unknown names are kept as-is.
    pub fn update_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn list(&self, name: &str) -> Option<&RecordList> {
        self.lists.get(name)
    }

    pub fn lists(&self) -> &BTreeMap<String, RecordList> {
        &self.lists
    }

    /// Append a default record; returns its index.
    pub fn add_list_item(&mut self, list: &str) -> Result<usize, FormStateError> {
        let records = self.list_mut(list)?;
        Ok(records.push_blank())
    }

    /// Remove by position. Refuses to empty the collection and ignores
    /// out-of-range positions; returns whether a record was removed.
    pub fn remove_list_item(&mut self, list: &str, index: usize) -> Result<bool, FormStateError> {
        let records = self.list_mut(list)?;
        Ok(records.remove(index))
    }

    pub fn update_list_field(
        &mut self,
        list: &str,
        index: usize,
        attribute: &str,
        value: impl Into<String>,
    ) -> Result<(), FormStateError> {
        let records = self.list_mut(list)?;
        if records.template.attribute(attribute).is_none() {
            return Err(FormStateError::UnknownAttribute {
                list: list.to_string(),
                attribute: attribute.to_string(),
            });
        }
        let record = records
            .items
            .get_mut(index)
            .ok_or_else(|| FormStateError::ItemOutOfRange {
                list: list.to_string(),
                index,
            })?;
        record.values.insert(attribute.to_string(), value.into());
        Ok(())
    }

    /// Back to defaults with one blank record per collection.
    pub fn reset(&mut self) {
        self.fields = self.defaults.clone();
        for records in self.lists.values_mut() {
            records.items = vec![ListRecord::blank(&records.template)];
        }
    }

    /// Whether the user has typed anything beyond the defaults.
    pub fn is_pristine(&self) -> bool {
        let fields_untouched = self.fields.iter().all(|(name, value)| {
            self.defaults
                .get(name)
                .map_or(value.is_empty(), |default| default == value)
        });
        fields_untouched
            && self
                .lists
                .values()
                .all(|records| records.len() == 1 && records.items[0] == ListRecord::blank(&records.template))
    }

    fn list_mut(&mut self, list: &str) -> Result<&mut RecordList, FormStateError> {
        self.lists
            .get_mut(list)
            .ok_or_else(|| FormStateError::UnknownList(list.to_string()))
    }
}
