use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::properties::{
    ExpressionOfInterest, InterestId, InterestRepository, Property, PropertyId, PropertyRepository,
};
use crate::shared::RepositoryError;

#[derive(Debug, Default, Clone)]
pub struct MemoryPropertyRepository {
    records: Arc<Mutex<HashMap<PropertyId, Property>>>,
}

impl PropertyRepository for MemoryPropertyRepository {
    fn insert(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().expect("property repository mutex poisoned");
        if guard.values().any(|existing| existing.slug == property.slug) {
            return Err(RepositoryError::Conflict(format!("slug {}", property.slug)));
        }
        guard.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    fn update(&self, mut property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().expect("property repository mutex poisoned");
        let slot = guard.get_mut(&property.id).ok_or(RepositoryError::NotFound)?;
        property.view_count = slot.view_count;
        *slot = property;
        Ok(slot.clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.records.lock().expect("property repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Property>, RepositoryError> {
        let guard = self.records.lock().expect("property repository mutex poisoned");
        Ok(guard.values().find(|property| property.slug == slug).cloned())
    }

    fn record_view(&self, id: &PropertyId) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().expect("property repository mutex poisoned");
        let property = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        property.view_count += 1;
        Ok(property.clone())
    }

    fn delete(&self, id: &PropertyId) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().expect("property repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<Property>, RepositoryError> {
        let guard = self.records.lock().expect("property repository mutex poisoned");
        let mut properties: Vec<Property> = guard.values().cloned().collect();
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryInterestRepository {
    records: Arc<Mutex<HashMap<InterestId, ExpressionOfInterest>>>,
}

impl InterestRepository for MemoryInterestRepository {
    fn insert(
        &self,
        interest: ExpressionOfInterest,
    ) -> Result<ExpressionOfInterest, RepositoryError> {
        let mut guard = self.records.lock().expect("interest repository mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.reference_number == interest.reference_number)
        {
            return Err(RepositoryError::Conflict(interest.reference_number));
        }
        guard.insert(interest.id.clone(), interest.clone());
        Ok(interest)
    }

    fn update(&self, interest: ExpressionOfInterest) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("interest repository mutex poisoned");
        match guard.get_mut(&interest.id) {
            Some(slot) => {
                *slot = interest;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &InterestId) -> Result<Option<ExpressionOfInterest>, RepositoryError> {
        let guard = self.records.lock().expect("interest repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<ExpressionOfInterest>, RepositoryError> {
        let guard = self.records.lock().expect("interest repository mutex poisoned");
        let mut interests: Vec<ExpressionOfInterest> = guard.values().cloned().collect();
        interests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(interests)
    }

    fn count_for(&self, property_id: &PropertyId) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("interest repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|interest| &interest.property_id == property_id)
            .count())
    }

    fn delete_for(&self, property_id: &PropertyId) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("interest repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, interest| &interest.property_id != property_id);
        Ok(before - guard.len())
    }
}
