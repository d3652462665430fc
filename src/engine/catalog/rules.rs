//! Built-in portfolio rule set.
//!
//! Roughly forty topic categories, Spanish-first. The *number* of categories
//! is data, not logic: adding a topic means appending a rule here. Patterns
//! match the normalized (lowercase, diacritic-free) message; template text
//! keeps its accents because it is shown to the visitor as-is.
//!
//! Subject facts (name, role, years, contact) are spliced into the templates
//! at construction time from [`SubjectProfile`].

use crate::engine::config::SubjectProfile;
use crate::engine::errors::EngineResult;
use crate::engine::catalog::{ReplyGenerator, ResponseRule};
use crate::engine::topic::TopicTag;
use regex::Regex;

/// Build the full built-in rule list for a profile.
///
/// # Errors
/// Returns an error if any pattern fails to compile or a template set is
/// invalid.
#[allow(clippy::too_many_lines)]
pub fn builtin_rules(profile: &SubjectProfile) -> EngineResult<Vec<ResponseRule>> {
    let name = &profile.name;
    let role = &profile.role;
    let location = &profile.location;
    let years = profile.years_experience;
    let email = &profile.email;
    let github = &profile.github;

    let mut rules = Vec::new();

    rules.push(ResponseRule::new(
        "greeting",
        None,
        r"\b(hola|buenas|buenos dias|buenas tardes|buenas noches|hey|saludos)\b",
        Some(r"\b(como estas|como te va|como andas|que tal)\b"),
        vec![
            format!("¡Hola! Soy el asistente del portfolio de {name}. Pregúntame lo que quieras sobre su perfil."),
            format!("¡Buenas! Aquí puedes conocer a {name}, {role}. ¿Por dónde empezamos?"),
            format!("¡Hola! Encantado de saludarte. Soy el chat del portfolio de {name}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "how_are_you",
        None,
        r"\b(como estas|como te va|como andas|que tal)\b",
        None,
        vec![
            "¡Muy bien, gracias por preguntar! Listo para contarte lo que quieras del portfolio.".to_string(),
            "Todo en orden por aquí. ¿Y tú qué tal? Pregúntame lo que quieras.".to_string(),
            "De maravilla. Un chat sin preocupaciones. ¿En qué te puedo ayudar?".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "identity",
        None,
        r"\b(quien eres|presentate|hablame de ti|sobre ti)\b",
        None,
        vec![
            format!("Soy el asistente virtual de {name}, {role} con base en {location}."),
            format!("Represento a {name} en este portfolio. Puedo contarte sobre su perfil, su formación y lo que ha construido."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "name",
        None,
        r"\b(como te llamas|cual es tu nombre|tu nombre)\b",
        None,
        vec![
            format!("Me puedes llamar el asistente de {name}. Él es el protagonista aquí."),
            format!("No tengo nombre propio, hablo en nombre de {name}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "skills",
        Some(TopicTag::Skills),
        r"\b(habilidad(es)?|que sabes hacer|fortalezas|puntos fuertes)\b",
        None,
        vec![
            "Domina tanto frontend como backend: interfaces, APIs, bases de datos y despliegues. ¿Quieres saber más de alguna tecnología?".to_string(),
            "Sus puntos fuertes: diseño de APIs, interfaces web cuidadas y automatización de despliegues.".to_string(),
            "Se mueve bien en todo el ciclo: desde la idea hasta producción. ¿Te cuento más de su stack?".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "technologies",
        Some(TopicTag::Skills),
        r"\b(tecnologias?|herramientas|stack|frameworks?)\b",
        None,
        vec![
            "Su stack habitual: Rust y TypeScript en el backend, React en el frontend, PostgreSQL y Docker por debajo.".to_string(),
            "Entre sus tecnologías de diario: Rust, React, PostgreSQL y Docker. ¿Quieres saber más?".to_string(),
            "Tecnologías de cabecera: Rust, TypeScript, React y PostgreSQL.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::with_generator(
        "tech_specific",
        Some(TopicTag::Skills),
        r"\b(rust|react|python|typescript|javascript|node|docker|postgres|postgresql|kubernetes|aws|vue|angular|cobol)\b",
        None,
        ReplyGenerator::TechLookup {
            extract: Regex::new(
                r"\b(rust|react|python|typescript|javascript|node|docker|postgres|postgresql|kubernetes|aws|vue|angular|cobol)\b",
            )?,
            replies: vec![
                ("rust", "Rust es su lenguaje favorito: lo usa para servicios backend donde el rendimiento y la fiabilidad importan.".to_string()),
                ("react", "Con React lleva años construyendo interfaces; es su opción por defecto en el frontend.".to_string()),
                ("python", "Python lo reserva para scripts, prototipos y análisis de datos rápidos.".to_string()),
                ("typescript", "TypeScript es su estándar en todo proyecto web: tipos primero, sustos después.".to_string()),
                ("docker", "Docker está en todos sus proyectos: desarrollo reproducible y despliegues sin sorpresas.".to_string()),
                ("postgres", "PostgreSQL es su base de datos de confianza para casi todo.".to_string()),
                ("postgresql", "PostgreSQL es su base de datos de confianza para casi todo.".to_string()),
                ("aws", "Ha desplegado varios proyectos en AWS, sobre todo con contenedores.".to_string()),
            ],
            fallback: vec![
                "La conoce de pasada, pero no es parte de su stack principal. Pregúntame por Rust, React o PostgreSQL.".to_string(),
                "No es una herramienta que use a diario. Su día a día gira en torno a Rust y TypeScript.".to_string(),
            ],
        },
    )?);

    rules.push(ResponseRule::new(
        "languages_opinion",
        Some(TopicTag::Skills),
        r"\blenguajes?\b",
        None,
        vec![
            "El lenguaje con el que más cómodo se siente es Rust, seguido de cerca por TypeScript.".to_string(),
            "Si tiene que elegir un lenguaje, elige Rust: lleva años con él y es el corazón de su backend.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "projects",
        Some(TopicTag::Projects),
        r"\b(proyectos?|portafolio|que has hecho|que has construido)\b",
        Some(r"\b(mejor proyecto|proyecto favorito)\b"),
        vec![
            "Tiene proyectos de todo tipo: plataformas SaaS, APIs y herramientas internas de automatización. ¿Quieres saber más?".to_string(),
            "En su portafolio hay APIs públicas, paneles de analítica y algún experimento con IA. ¿Te cuento más de alguno?".to_string(),
            "Los proyectos más recientes combinan Rust en el backend con React en el frontend. ¿Quieres que te cuente alguno en detalle?".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "project_highlight",
        Some(TopicTag::Projects),
        r"\b(mejor proyecto|proyecto favorito)\b",
        None,
        vec![
            "Su proyecto favorito es una plataforma de reservas en tiempo real que sigue en producción hoy.".to_string(),
            "Del que más orgulloso está: un motor de búsqueda interno que redujo tiempos de consulta de minutos a milisegundos.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "education",
        Some(TopicTag::Education),
        r"\b(educacion|estudios|formacion|universidad|donde estudiaste|que estudiaste)\b",
        None,
        vec![
            "Estudió Ingeniería Informática y no ha dejado de formarse desde entonces. ¿Quieres saber más?".to_string(),
            "Estudió Ingeniería Informática y completó su formación con cursos de arquitectura de software y sistemas distribuidos.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "certifications",
        Some(TopicTag::Education),
        r"\b(certificacion(es)?|certificados?|cursos)\b",
        None,
        vec![
            "Tiene certificaciones de AWS y varios cursos de arquitectura de software al día.".to_string(),
            "Entre sus certificados: AWS Solutions Architect y formación continua en seguridad.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "trajectory",
        Some(TopicTag::Trajectory),
        r"\b(trayectoria|experiencia (laboral|profesional)|carrera profesional|recorrido profesional)\b",
        None,
        vec![
            format!("Lleva {years} años de trayectoria profesional, de startups a empresas de producto. ¿Quieres saber más?"),
            format!("Su carrera profesional suma {years} años construyendo software que llega a producción."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "current_job",
        Some(TopicTag::Trajectory),
        r"\b(trabajo actual|donde trabajas|en que trabajas|empresa actual)\b",
        None,
        vec![
            format!("Actualmente trabaja como {role}, centrado en plataformas web de alto tráfico."),
            format!("Hoy ejerce de {role}; los detalles de la empresa los reserva para una conversación directa."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "contact",
        None,
        r"\b(contacto|contactar|correo|email|mail)\b",
        None,
        vec![
            format!("Puedes escribirle a {email}; responde rápido."),
            format!("La mejor vía es el correo: {email}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "availability",
        None,
        r"\b(contratar|contratacion|disponible|disponibilidad|freelance|vacante|oferta)\b",
        None,
        vec![
            format!("Está abierto a escuchar propuestas interesantes. Escríbele a {email} con los detalles."),
            "Para colaboraciones o vacantes, lo mejor es el contacto directo por correo. Siempre responde.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "cv",
        None,
        r"\b(cv|curriculum|resume|hoja de vida)\b",
        None,
        vec![
            "El CV actualizado está enlazado en la cabecera de esta misma página.".to_string(),
            format!("Puedes descargar su currículum desde la web, o pedírselo directamente en {email}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "location",
        None,
        r"\b(donde vives|de donde eres|ubicacion|en que ciudad|en que pais)\b",
        None,
        vec![
            format!("Vive en {location}, aunque trabaja en remoto con equipos de varias zonas horarias."),
            format!("Su base es {location}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "age",
        None,
        r"\b(edad|cuantos anos|que edad)\b",
        None,
        vec![
            "La edad es lo de menos; los años de oficio cuentan más y de esos va sobrado.".to_string(),
            "Suficientes para haber visto morir varios frameworks de JavaScript.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "hobbies",
        None,
        r"\b(hobby|hobbies|tiempo libre|aficion(es)?)\b",
        None,
        vec![
            "Fuera del teclado: senderismo, fotografía y algún que otro side-project que se le va de las manos.".to_string(),
            "Le gusta desconectar con montaña y música en vivo.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "music",
        None,
        r"\b(musica|cancion(es)?|banda favorita|grupo favorito)\b",
        None,
        vec![
            "Programa con post-rock de fondo; para concentrarse, nada de letras.".to_string(),
            "De todo un poco, aunque en su playlist de trabajo manda la música instrumental.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "sports",
        None,
        r"\b(deportes?|futbol|gimnasio|entrenas|correr)\b",
        None,
        vec![
            "Corre un par de veces por semana; dice que ahí se le desbloquean los bugs.".to_string(),
            "Más de montaña que de estadio: senderismo y bici.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "movies",
        None,
        r"\b(peliculas?|series?|netflix|cine)\b",
        None,
        vec![
            "Fan de la ciencia ficción: si hay naves o viajes en el tiempo, ya lo tienes ganado.".to_string(),
            "Última serie que le atrapó: cualquier cosa con buen guion y pocas temporadas.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "books",
        None,
        r"\b(libros?|lectura|leer)\b",
        None,
        vec![
            "Alterna ensayos técnicos con novela negra. En la mesilla siempre hay dos libros a medias.".to_string(),
            "Relee 'The Pragmatic Programmer' cada pocos años; dice que cambia según quién lo lea.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "food",
        None,
        r"\b(comida|plato favorito|cocinar|cocinas)\b",
        None,
        vec![
            "Cocinar es su otra forma de depurar: paella los domingos, sin piña en la pizza.".to_string(),
            "Su plato estrella es la paella, con debate familiar incluido sobre los ingredientes.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "travel",
        None,
        r"\b(viajar|viajes?|paises)\b",
        None,
        vec![
            "Siempre que puede se escapa: el último viaje fue a Japón y volvió con mil fotos.".to_string(),
            "Viajar es su excusa favorita para desconectar del código.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "goals",
        None,
        r"\b(metas?|objetivos?|futuro|aspiracion(es)?|planes)\b",
        None,
        vec![
            "A medio plazo: liderar equipos técnicos sin soltar del todo el teclado.".to_string(),
            "Su meta es seguir construyendo producto y mentorizar a gente que empieza.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "thanks",
        None,
        r"\b(gracias|te lo agradezco|muy amable)\b",
        None,
        vec![
            "¡De nada! Para eso estoy. ¿Algo más que quieras saber?".to_string(),
            "¡Un placer! Si te surge otra duda, aquí sigo.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "farewell",
        None,
        r"\b(adios|chao|chau|hasta luego|nos vemos|me voy|hasta pronto)\b",
        None,
        vec![
            "¡Hasta luego! Gracias por pasarte por el portfolio.".to_string(),
            "¡Nos vemos! Que vaya muy bien.".to_string(),
            "¡Chao! Vuelve cuando quieras.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "joke",
        None,
        r"\b(chiste|algo gracioso|hazme reir|broma)\b",
        None,
        vec![
            "¿Por qué los programadores confunden Halloween con Navidad? Porque OCT 31 == DEC 25.".to_string(),
            "Hay 10 tipos de personas: las que entienden binario y las que no.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "help",
        None,
        r"\b(ayuda|ayudame|que puedes hacer|que puedo preguntar|opciones)\b",
        None,
        vec![
            "Puedes preguntarme por sus habilidades, proyectos, formación, trayectoria o cómo contactarle.".to_string(),
            "Prueba con: «¿qué tecnologías usas?», «háblame de tus proyectos» o «¿cómo te contacto?».".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "compliment",
        None,
        r"\b(buen trabajo|esta genial|impresionante|increible|me encanta (tu|la) (web|pagina))\b",
        None,
        vec![
            "¡Gracias! Se lo haré llegar, le va a alegrar el día.".to_string(),
            "¡Qué bien que te guste! La web también es obra suya, claro.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "insult",
        None,
        r"\b(tonto|inutil|aburrido|basura|no sirves)\b",
        None,
        vec![
            "Vaya, lo siento si no he estado a la altura. Prueba a preguntarme por proyectos o tecnologías.".to_string(),
            "Anotado. Soy un chat sencillo, pero de su perfil profesional lo sé todo.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "weather",
        None,
        r"\b(clima|que tiempo hace|hace calor|hace frio|llueve)\b",
        Some(r"\btiempo libre\b"),
        vec![
            "De meteorología no controlo, pero de su perfil profesional lo sé todo.".to_string(),
            format!("No tengo ventana, pero en {location} suele hacer mejor tiempo que en producción un viernes."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "ai_question",
        None,
        r"\b(eres un bot|eres una ia|eres humano|inteligencia artificial|eres real)\b",
        None,
        vec![
            "Soy un bot sencillo de reglas, sin redes neuronales detrás. Lo justo para presentarte bien este portfolio.".to_string(),
            "Humano no soy: respondo con frases preparadas. Las decisiones importantes las toma él.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "salary",
        None,
        r"\b(salario|sueldo|cuanto cobras|cuanto ganas|tarifa)\b",
        None,
        vec![
            "Eso se habla en privado y con café de por medio. Escríbele y lo cuadráis.".to_string(),
            format!("Las condiciones las negocia en directo: {email}."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "github",
        None,
        r"\b(github|repositorios?|codigo fuente|open source)\b",
        None,
        vec![
            format!("Su código público vive en {github}. Hay de todo: librerías, demos y experimentos."),
            format!("Pásate por {github}; los repos fijados son buena carta de presentación."),
        ],
    )?);

    rules.push(ResponseRule::new(
        "linkedin",
        None,
        r"\b(linkedin|redes sociales|twitter)\b",
        None,
        vec![
            "En LinkedIn está activo y acepta conexiones; el enlace está en el pie de esta página.".to_string(),
            "Lo encuentras en LinkedIn con su nombre completo; responde mensajes ahí también.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "soft_skills",
        None,
        r"\b(trabajo en equipo|liderazgo|comunicacion|soft skills|habilidades blandas)\b",
        None,
        vec![
            "Ha liderado equipos pequeños y le dan tan buena fama las retros como los code reviews.".to_string(),
            "Comunicación clara y documentación al día: sus compañeros lo citan como referencia.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "methodology",
        None,
        r"\b(agil(es)?|scrum|kanban|metodologias?)\b",
        None,
        vec![
            "Ha trabajado con Scrum y Kanban; prefiere procesos ligeros que no estorben.".to_string(),
            "Metodologías ágiles sí, ceremonias infinitas no. Entregas cortas y feedback rápido.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "frontend_backend",
        None,
        r"\b(frontend|backend|front end|back end|fullstack|full stack)\b",
        None,
        vec![
            "Se define full-stack, pero si le haces elegir se queda con el backend.".to_string(),
            "Frontend para que se vea bien, backend para que no se caiga. Disfruta de ambos.".to_string(),
        ],
    )?);

    rules.push(ResponseRule::new(
        "english_level",
        None,
        r"\b(ingles|idiomas|bilingue)\b",
        None,
        vec![
            "Trabaja en inglés a diario: reuniones, documentación y code reviews.".to_string(),
            "Español nativo e inglés profesional fluido.".to_string(),
        ],
    )?);

    Ok(rules)
}

/// Filler replies per topic, used to resolve a bare affirmation when no
/// catalog rule carries the stored tag.
#[must_use]
pub fn topic_fillers(topic: TopicTag) -> &'static [&'static str] {
    match topic {
        TopicTag::Trajectory => &[
            "Pues su recorrido pasa por startups, consultoría y producto propio; lo que más valora es haber visto sistemas crecer de cero a producción.",
            "Te resumo: empezó en una startup pequeña, pasó por consultoría y hoy construye producto. Cada etapa le dejó algo.",
        ],
        TopicTag::Projects => &[
            "Uno destacado: una plataforma de reservas en tiempo real, con Rust detrás y React delante. Sigue viva en producción.",
            "Te cuento otro: un panel de analítica interna que hoy usan tres equipos a diario.",
        ],
        TopicTag::Education => &[
            "Además del grado en Ingeniería Informática, no ha parado: cursos de arquitectura, sistemas distribuidos y seguridad.",
            "Lo más valioso de su etapa universitaria, según él: aprender a aprender. El resto lo ha ido sumando trabajando.",
        ],
        TopicTag::Skills => &[
            "En corto: Rust y TypeScript como lenguajes principales, React en la interfaz, PostgreSQL y Docker en la base.",
            "Si bajamos al detalle: APIs en Rust, frontends en React, y toda la tubería de CI/CD automatizada.",
        ],
        TopicTag::Default => &[
            "¡Genial! ¿Sobre qué parte te gustaría profundizar: proyectos, tecnologías o trayectoria?",
            "Perfecto. Dime qué te interesa más y seguimos por ahí.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::topic::{contains_invitation, infer_topic};
    use crate::engine::normalize::NormalizedMessage;

    #[test]
    fn test_builtin_rule_count() {
        let rules = builtin_rules(&SubjectProfile::default()).unwrap();
        assert!(rules.len() >= 40, "got {}", rules.len());
    }

    #[test]
    fn test_rule_names_are_unique() {
        let rules = builtin_rules(&SubjectProfile::default()).unwrap();
        let mut names: Vec<_> = rules.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn test_every_projects_template_invites_follow_up() {
        // Keeps the "proyectos" → "sí" flow deterministic.
        let rules = builtin_rules(&SubjectProfile::default()).unwrap();
        let projects = rules.iter().find(|r| r.name == "projects").unwrap();
        let message = NormalizedMessage::new("cuentame sobre tus proyectos");
        for seed in 0..16_u64 {
            use rand::SeedableRng;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let reply = projects.generate(&message, &mut rng);
            let normalized = NormalizedMessage::new(&reply);
            assert!(contains_invitation(normalized.as_str()), "{reply}");
            assert_eq!(infer_topic(normalized.as_str()), TopicTag::Projects);
        }
    }

    #[test]
    fn test_fillers_exist_for_all_topics() {
        for tag in TopicTag::ALL {
            assert!(!topic_fillers(*tag).is_empty());
        }
    }
}
