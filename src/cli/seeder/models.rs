use uuid::Uuid;

pub struct ClassSeed {
    pub name: String,
}

pub struct SectionSeed {
    pub name: String,
    pub class_id: Uuid,
}

pub struct StudentSeed {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub class_id: Uuid,
    pub section_id: Uuid,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub classes: usize,
    pub sections_per_class: usize,
    pub students_per_section: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            classes: 10,            // Class 1-10
            sections_per_class: 3,  // A, B, C
            students_per_section: 5,
        }
    }
}

impl SeedConfig {
    pub fn total_sections(&self) -> usize {
        self.classes * self.sections_per_class
    }

    pub fn total_students(&self) -> usize {
        self.total_sections() * self.students_per_section
    }
}
