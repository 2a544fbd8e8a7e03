//! Employee directory keyed by employee number.

use std::collections::HashMap;

use crate::models::Employee;

use super::EmployeeLookup;

/// Read-only table of employees keyed by [`Employee::id`].
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: HashMap<String, Employee>,
}

impl EmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee, returning the record it replaced, if any.
    pub fn insert(&mut self, employee: Employee) -> Option<Employee> {
        self.employees.insert(employee.id.clone(), employee)
    }

    /// Returns the number of employees in the directory.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the directory holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl EmployeeLookup for EmployeeDirectory {
    fn get(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.get(employee_id)
    }
}

impl FromIterator<Employee> for EmployeeDirectory {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        let mut directory = Self::new();
        for employee in iter {
            directory.insert(employee);
        }
        directory
    }
}
