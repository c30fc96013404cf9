pub mod auth;
pub mod health;
pub mod students;
pub mod teachers;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::me),
    )
    .service(
        web::scope("/teachers")
            .service(teachers::get_teachers)
            .service(teachers::create_teacher)
            .service(teachers::get_teacher)
            .service(teachers::update_teacher)
            .service(teachers::delete_teacher),
    )
    .service(
        web::scope("/students")
            .service(students::get_students)
            .service(students::create_student)
            .service(students::get_student)
            .service(students::update_student)
            .service(students::delete_student),
    );
}
