pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod lesson_progress;
pub(crate) mod lessons;
pub(crate) mod quizzes;
pub(crate) mod users;
