//! Schema dumps shared by the tests of this crate and the cli.

use crate::{PostgresSchemaDump, SqlReader};

/// A `pg_dump --schema-only --clean` style dump of a small forms application.
///
/// The `submissions` prefix selects `submissions_answers` and `submissions_forms`.
/// `users` is referenced through `submissions_forms.user_id`, while `form_comments`
/// points back at `submissions_forms` through `submissions_form_id`.
pub const SUBMISSIONS_DUMP: &str = r#"--
-- PostgreSQL database dump
--

SET statement_timeout = 0;
SET lock_timeout = 0;
SET client_encoding = 'UTF8';
SELECT pg_catalog.set_config('search_path', '', false);

ALTER TABLE IF EXISTS ONLY public.submissions_forms DROP CONSTRAINT IF EXISTS fk_rails_3f9a1b2c4d;
ALTER TABLE IF EXISTS ONLY public.submissions_answers DROP CONSTRAINT IF EXISTS fk_rails_8e7d6c5b4a;
ALTER TABLE IF EXISTS ONLY public.audit_logs DROP CONSTRAINT IF EXISTS fk_rails_1a2b3c4d5e;
ALTER TABLE IF EXISTS ONLY public.users DROP CONSTRAINT IF EXISTS users_pkey;
DROP TABLE IF EXISTS public.users;
DROP TABLE IF EXISTS public.submissions_forms;
DROP TABLE IF EXISTS public.submissions_answers;
DROP TYPE IF EXISTS public.user_role;
DROP TYPE IF EXISTS public.answer_kind;

--
-- Name: answer_kind; Type: TYPE; Schema: public; Owner: -
--

CREATE TYPE public.answer_kind AS ENUM (
    'text',
    'choice'
);

--
-- Name: user_role; Type: TYPE; Schema: public; Owner: -
--

CREATE TYPE public.user_role AS ENUM (
    'admin',
    'member'
);

--
-- Name: archive_state; Type: TYPE; Schema: public; Owner: -
--

CREATE TYPE public.archive_state AS ENUM (
    'pending',
    'done'
);

SET default_tablespace = '';

--
-- Name: submissions_answers; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.submissions_answers (
    id bigint NOT NULL,
    submissions_form_id bigint NOT NULL,
    kind public.answer_kind DEFAULT 'text'::public.answer_kind NOT NULL,
    body text
);

--
-- Name: submissions_forms; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.submissions_forms (
    id bigint NOT NULL,
    user_id bigint,
    title character varying(255) DEFAULT ''::character varying NOT NULL,
    created_at timestamp(6) without time zone NOT NULL
);

--
-- Name: users; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.users (
    id bigint NOT NULL,
    email character varying NOT NULL,
    role public.user_role DEFAULT 'member'::public.user_role NOT NULL
);

--
-- Name: audit_logs; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.audit_logs (
    id bigint NOT NULL,
    user_id bigint,
    payload jsonb
);

--
-- Name: form_comments; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.form_comments (
    id bigint NOT NULL,
    submissions_form_id bigint NOT NULL,
    body text
);

--
-- Name: submissionsarchive_entries; Type: TABLE; Schema: public; Owner: -
--

CREATE TABLE public.submissionsarchive_entries (
    id bigint NOT NULL,
    state public.archive_state
);

--
-- Name: users_id_seq; Type: SEQUENCE; Schema: public; Owner: -
--

CREATE SEQUENCE public.users_id_seq
    START WITH 1
    INCREMENT BY 1
    NO MINVALUE
    NO MAXVALUE
    CACHE 1;

ALTER TABLE ONLY public.users ALTER COLUMN id SET DEFAULT nextval('public.users_id_seq'::regclass);

--
-- Name: users users_pkey; Type: CONSTRAINT; Schema: public; Owner: -
--

ALTER TABLE ONLY public.users
    ADD CONSTRAINT users_pkey PRIMARY KEY (id);

--
-- Name: submissions_forms fk_rails_3f9a1b2c4d; Type: FK CONSTRAINT; Schema: public; Owner: -
--

ALTER TABLE ONLY public.submissions_forms
    ADD CONSTRAINT fk_rails_3f9a1b2c4d FOREIGN KEY (user_id) REFERENCES public.users(id);

--
-- Name: submissions_answers fk_rails_8e7d6c5b4a; Type: FK CONSTRAINT; Schema: public; Owner: -
--

ALTER TABLE ONLY public.submissions_answers
    ADD CONSTRAINT fk_rails_8e7d6c5b4a FOREIGN KEY (submissions_form_id) REFERENCES public.submissions_forms(id);

--
-- Name: audit_logs fk_rails_1a2b3c4d5e; Type: FK CONSTRAINT; Schema: public; Owner: -
--

ALTER TABLE ONLY public.audit_logs
    ADD CONSTRAINT fk_rails_1a2b3c4d5e FOREIGN KEY (user_id) REFERENCES public.users(id);

--
-- PostgreSQL database dump complete
--
"#;

/// Parses [SUBMISSIONS_DUMP].
pub fn read_submissions_dump() -> PostgresSchemaDump {
    SqlReader::new(SUBMISSIONS_DUMP).read_schema()
}
